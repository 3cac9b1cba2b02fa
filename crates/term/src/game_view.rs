//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board row 0 is the bottom row, so rows are flipped on the way to the screen.
//! Every tile is drawn as a colored block with its value centered inside.

use std::fmt::Write as _;

use arrayvec::ArrayString;

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Four columns fit a value up to 2048 inside the block.
        Self {
            cell_w: 4,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen origin of the board frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    rows: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Columns and rows needed to show a board and its side panel.
    pub fn required_size(&self, board_width: u16, board_height: u16) -> Viewport {
        let frame_w = board_width.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = board_height.saturating_mul(self.cell_h).saturating_add(2);
        Viewport::new(frame_w.saturating_add(2).saturating_add(self.panel_width()), frame_h)
    }

    fn panel_width(&self) -> u16 {
        self.cell_w.saturating_mul(4).max(10)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = snap.width.saturating_mul(self.cell_w);
        let board_px_h = snap.height.saturating_mul(self.cell_h);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);

        // Center the board and panel as one block.
        let total_w = frame_w.saturating_add(2).saturating_add(self.panel_width());
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let frame = Frame {
            x: start_x,
            y: start_y,
            w: frame_w,
            h: frame_h,
            rows: snap.height,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(start_x.saturating_add(1), start_y.saturating_add(1), board_px_w, board_px_h, ' ', CellStyle::new(PLAY_BG, PLAY_BG));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..snap.height as i32 {
            for col in 0..snap.width as i32 {
                match snap.value_at(row, col) {
                    Some(value) => self.draw_tile(fb, &frame, col, row, value),
                    None => self.draw_empty_cell(fb, &frame, col, row),
                }
            }
        }

        // Active piece tiles above the board stay hidden.
        if let Some(active) = &snap.active {
            for tile in &active.tiles {
                if tile.x >= 0 && tile.x < snap.width as i32 && tile.y >= 0 && tile.y < snap.height as i32 {
                    self.draw_tile(fb, &frame, tile.x, tile.y, tile.value);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, &frame);

        if snap.game_over {
            self.draw_overlay_text(fb, &frame, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay_text(fb, &frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x.saturating_add(dx), y, '─', style);
            fb.put_char(x.saturating_add(dx), bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y.saturating_add(dy), '│', style);
            fb.put_char(right, y.saturating_add(dy), '│', style);
        }
    }

    /// Top-left screen cell of board `(row, col)`.
    fn cell_origin(&self, frame: &Frame, col: i32, row: i32) -> (u16, u16) {
        let screen_row = (frame.rows as i32 - 1 - row) as u16;
        (
            frame
                .x
                .saturating_add(1)
                .saturating_add((col as u16).saturating_mul(self.cell_w)),
            frame
                .y
                .saturating_add(1)
                .saturating_add(screen_row.saturating_mul(self.cell_h)),
        )
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: &Frame, col: i32, row: i32) {
        let (px, py) = self.cell_origin(frame, col, row);
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG);
        let x = px.saturating_add((self.cell_w - 1) / 2);
        fb.put_char(x, py.saturating_add((self.cell_h - 1) / 2), '·', style);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, frame: &Frame, col: i32, row: i32, value: u32) {
        let (px, py) = self.cell_origin(frame, col, row);
        self.draw_block(fb, px, py, value);
    }

    /// A colored `cell_w x cell_h` block with the value centered on its middle row.
    fn draw_block(&self, fb: &mut FrameBuffer, px: u16, py: u16, value: u32) {
        let style = tile_style(value);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let label = tile_label(value, self.cell_w as usize);
        let offset = self.cell_w.saturating_sub(label.len() as u16) / 2;
        let y = py.saturating_add((self.cell_h - 1) / 2);
        fb.put_str(px.saturating_add(offset), y, &label, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: &Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = &snap.next {
            self.draw_preview(fb, next, panel_x, y);
        }
        y = y.saturating_add(self.cell_h.saturating_mul(4)).saturating_add(1);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.difficulty.as_str(), value);
    }

    /// Draw a preview piece in a 4x4 cell box whose top-left is `(x, y)`.
    fn draw_preview(&self, fb: &mut FrameBuffer, piece: &PieceSnapshot, x: u16, y: u16) {
        for tile in &piece.tiles {
            if !(0..4).contains(&tile.x) || !(0..4).contains(&tile.y) {
                continue;
            }
            let px = x.saturating_add((tile.x as u16).saturating_mul(self.cell_w));
            let py = y.saturating_add((3 - tile.y as u16).saturating_mul(self.cell_h));
            self.draw_block(fb, px, py, tile.value);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: &Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Value text that fits in `width` columns, switching to a `k` suffix for
/// values that do not.
fn tile_label(value: u32, width: usize) -> ArrayString<12> {
    let mut label = ArrayString::new();
    let _ = write!(label, "{value}");
    if label.len() > width {
        label.clear();
        let _ = write!(label, "{}k", value / 1024);
    }
    label
}

/// Background color by tile value, darkening text on light tiles.
fn tile_style(value: u32) -> CellStyle {
    let bg = match value {
        0..=2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => Rgb::new(237, 194, 46),
        _ => Rgb::new(60, 58, 50),
    };
    let fg = if value <= 4 {
        Rgb::new(119, 110, 101)
    } else {
        Rgb::new(249, 246, 242)
    };
    CellStyle::new(fg, bg).bold()
}
