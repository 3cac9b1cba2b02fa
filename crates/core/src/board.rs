//! Board module - owns the grid of landed tiles
//!
//! The board is a `width x height` grid where each cell is empty or holds one
//! [`Tile`]. Storage is a flat row-major vector with row 0 at the *bottom*.
//! Coordinates are `(row, col)` as signed integers so callers can query cells
//! outside the grid: those are never occupied.
//!
//! After a tetromino is committed the board settles in a fixed order, each step
//! run to its fixpoint:
//!
//! 1. [`Board::merge`]: equal vertical neighbours combine, the lower one doubles.
//! 2. [`Board::clear_lines`]: full rows are scored and removed.
//! 3. [`Board::remove_gaps`]: isolated floating tiles fall.
//!
//! The sequence repeats while a pass still clears rows or drops tiles.

use log::debug;

use crate::position::Position;
use crate::tetromino::Tetromino;
use crate::tile::Tile;
use crate::types::BoardConfig;

/// A board cell.
pub type Cell = Option<Tile>;

/// Inclusive bounding box of a committed piece, in board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub min_row: i32,
    pub max_row: i32,
    pub min_col: i32,
    pub max_col: i32,
}

impl Footprint {
    fn at(position: Position) -> Self {
        Self {
            min_row: position.y,
            max_row: position.y,
            min_col: position.x,
            max_col: position.x,
        }
    }

    fn extend(&mut self, position: Position) {
        self.min_row = self.min_row.min(position.y);
        self.max_row = self.max_row.max(position.y);
        self.min_col = self.min_col.min(position.x);
        self.max_col = self.max_col.max(position.x);
    }
}

/// What one call to [`Board::settle`] changed, summed over its passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettleReport {
    pub merges: usize,
    pub lines_cleared: usize,
    pub tiles_dropped: usize,
    /// Score gained by the whole settle.
    pub points: u32,
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Row-major, row 0 at the bottom (`row * width + col`)
    cells: Vec<Cell>,
    score: u32,
    game_over: bool,
    paused: bool,
    /// Footprint of the last committed piece; limits the merge scan
    landed: Option<Footprint>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    ///
    /// Panics on a zero dimension. Validate user input with
    /// [`BoardConfig::new`] first.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(
            width > 0 && height > 0,
            "board dimensions must be positive, got {width}x{height}"
        );
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: std::iter::repeat_with(|| None).take(len).collect(),
            score: 0,
            game_over: false,
            paused: false,
            landed: None,
        }
    }

    pub fn from_config(config: BoardConfig) -> Self {
        Self::new(config.width, config.height)
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.is_inside(row, col) {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Footprint of the most recent commit that has not been settled yet.
    pub fn landed(&self) -> Option<Footprint> {
        self.landed
    }

    /// Check if `(row, col)` lies on the board
    pub fn is_inside(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.height as i32 && col >= 0 && col < self.width as i32
    }

    /// Check if `(row, col)` holds a tile. Out of bounds is never occupied.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.tile(row, col).is_some()
    }

    pub fn tile(&self, row: i32, col: i32) -> Option<&Tile> {
        self.index(row, col).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Value of the tile at `(row, col)`, if any.
    pub fn value_at(&self, row: i32, col: i32) -> Option<u32> {
        self.tile(row, col).map(Tile::value)
    }

    /// Put a fresh tile with `value` at `(row, col)`, replacing any tile there.
    /// Returns false if out of bounds.
    pub fn place(&mut self, row: i32, col: i32, value: u32) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = Some(Tile::new(value, Position::new(col, row)));
                true
            }
            None => false,
        }
    }

    /// Remove and return the tile at `(row, col)`.
    pub fn take(&mut self, row: i32, col: i32) -> Option<Tile> {
        let idx = self.index(row, col)?;
        self.cells[idx].take()
    }

    /// Flat row-major cells, row 0 at the bottom.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate `(row, col, tile)` over occupied cells, bottom row first.
    pub fn tiles(&self) -> impl Iterator<Item = (i32, i32, &Tile)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.as_ref()
                .map(|tile| ((idx / width) as i32, (idx % width) as i32, tile))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: i32) -> bool {
        if row < 0 || row >= self.height as i32 {
            return false;
        }
        let start = row as usize * self.width as usize;
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Reset to an empty, unpaused board with zero score.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
        self.score = 0;
        self.game_over = false;
        self.paused = false;
        self.landed = None;
    }

    /// Move the tile at `(from_row, col)` to `(to_row, col)`, keeping its
    /// stored position in sync. The destination must be empty.
    fn shift_tile(&mut self, from_row: i32, to_row: i32, col: i32) {
        let Some(mut tile) = self.take(from_row, col) else {
            return;
        };
        tile.set_position(Position::new(col, to_row));
        if let Some(idx) = self.index(to_row, col) {
            debug_assert!(self.cells[idx].is_none(), "shift onto occupied cell");
            self.cells[idx] = Some(tile);
        }
    }

    /// Take ownership of a landed tetromino's tiles.
    ///
    /// Tiles inside the board move into their cells. Any tile at or above the
    /// top boundary ends the game. Returns the game-over flag.
    pub fn commit(&mut self, tetromino: Tetromino) -> bool {
        let kind = tetromino.kind();
        let mut footprint: Option<Footprint> = None;

        for tile in tetromino.into_tiles() {
            let pos = tile.position();
            match self.index(pos.y, pos.x) {
                Some(idx) => {
                    debug_assert!(self.cells[idx].is_none(), "commit onto occupied cell");
                    self.cells[idx] = Some(tile);
                    match footprint.as_mut() {
                        Some(f) => f.extend(pos),
                        None => footprint = Some(Footprint::at(pos)),
                    }
                }
                None => self.game_over = true,
            }
        }

        self.landed = footprint;
        if self.game_over {
            debug!("{kind:?} landed above the board, game over with score {}", self.score);
        } else {
            debug!("committed {kind:?} at {footprint:?}");
        }
        self.game_over
    }

    /// Rows and columns scanned by [`Board::merge`]: the landed footprint
    /// widened one row downwards, or the whole board if nothing has landed.
    ///
    /// Rows are the *lower* cell of each compared pair.
    fn merge_region(&self) -> (std::ops::RangeInclusive<i32>, std::ops::RangeInclusive<i32>) {
        let top = self.height as i32 - 2;
        match self.landed {
            Some(f) => (
                (f.min_row - 1).max(0)..=f.max_row.min(top),
                f.min_col.max(0)..=f.max_col.min(self.width as i32 - 1),
            ),
            None => (0..=top, 0..=self.width as i32 - 1),
        }
    }

    /// Lowest vertically adjacent equal pair in the merge region, scanning
    /// column by column from the bottom.
    fn find_merge_pair(
        &self,
        rows: &std::ops::RangeInclusive<i32>,
        cols: &std::ops::RangeInclusive<i32>,
    ) -> Option<(i32, i32)> {
        for col in cols.clone() {
            for row in rows.clone() {
                let (Some(lower), Some(upper)) = (self.value_at(row, col), self.value_at(row + 1, col))
                else {
                    continue;
                };
                if lower == upper {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Merge `(row + 1, col)` into `(row, col)` and collapse the column above.
    fn merge_at(&mut self, row: i32, col: i32) -> u32 {
        let consumed = self.take(row + 1, col);
        debug_assert!(consumed.is_some(), "merge without an upper tile");

        let Some(idx) = self.index(row, col) else {
            return 0;
        };
        let Some(lower) = self.cells[idx].as_mut() else {
            return 0;
        };
        let value = lower.double();
        self.score = self.score.saturating_add(value);

        for r in row + 2..self.height as i32 {
            self.shift_tile(r, r - 1, col);
        }

        debug!("merged into {value} at row {row} col {col}");
        value
    }

    /// Combine equal vertical neighbours until none are left in the region.
    ///
    /// Each merge doubles the lower tile, removes the upper one, adds the
    /// doubled value to the score and collapses the column above by one cell.
    /// A doubled tile may now match the one below it, so the region grows
    /// downwards to cover every merged row. Every merge removes a tile, so the
    /// loop terminates. Returns the number of merges.
    pub fn merge(&mut self) -> usize {
        let (mut rows, cols) = self.merge_region();
        let mut merges = 0;
        while let Some((row, col)) = self.find_merge_pair(&rows, &cols) {
            self.merge_at(row, col);
            merges += 1;
            let floor = (row - 1).max(0);
            if floor < *rows.start() {
                rows = floor..=*rows.end();
            }
        }
        merges
    }

    /// Empty a full row, shift everything above it down one and return the
    /// sum of the removed values.
    fn clear_row(&mut self, row: i32) -> u32 {
        let mut points: u32 = 0;
        for col in 0..self.width as i32 {
            if let Some(tile) = self.take(row, col) {
                points = points.saturating_add(tile.value());
            }
        }
        for r in row + 1..self.height as i32 {
            for col in 0..self.width as i32 {
                self.shift_tile(r, r - 1, col);
            }
        }
        points
    }

    /// Clear every full row and score the values it held.
    ///
    /// Rows are handled bottom to top and the scan resumes at the cleared
    /// index, since the row shifted into it may be full as well. Returns the
    /// number of rows cleared.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = 0;
        while row < self.height as i32 {
            if !self.is_row_full(row) {
                row += 1;
                continue;
            }
            let points = self.clear_row(row);
            self.score = self.score.saturating_add(points);
            cleared += 1;
            debug!("cleared row {row} for {points} points");
        }
        cleared
    }

    /// A tile floats when the cell below is empty and so are both horizontal
    /// neighbours (board edges count as empty).
    fn is_floating(&self, row: i32, col: i32) -> bool {
        row > 0
            && self.is_occupied(row, col)
            && !self.is_occupied(row - 1, col)
            && !self.is_occupied(row, col - 1)
            && !self.is_occupied(row, col + 1)
    }

    /// Let isolated floating tiles fall until they rest on a tile or the floor.
    ///
    /// Repeats until a full pass moves nothing, since a fall can expose another
    /// floating tile. Returns the number of falls.
    pub fn remove_gaps(&mut self) -> usize {
        let mut total = 0;
        loop {
            let mut moved = 0;
            for row in 1..self.height as i32 {
                for col in 0..self.width as i32 {
                    if !self.is_floating(row, col) {
                        continue;
                    }
                    let mut target = row;
                    while target > 0 && !self.is_occupied(target - 1, col) {
                        target -= 1;
                    }
                    self.shift_tile(row, target, col);
                    debug!("tile at row {row} col {col} fell to row {target}");
                    moved += 1;
                }
            }
            if moved == 0 {
                break;
            }
            total += moved;
        }
        total
    }

    /// Run merge, line clear and gap removal, each to its fixpoint, then
    /// forget the landed footprint.
    ///
    /// The first pass merges inside the landed footprint. Clears and falls can
    /// line up new equal pairs anywhere, so while a pass clears or drops
    /// anything another pass runs over the whole board.
    pub fn settle(&mut self) -> SettleReport {
        let before = self.score;
        let mut report = SettleReport::default();
        loop {
            let merges = self.merge();
            let lines_cleared = self.clear_lines();
            let tiles_dropped = self.remove_gaps();
            report.merges += merges;
            report.lines_cleared += lines_cleared;
            report.tiles_dropped += tiles_dropped;
            self.landed = None;
            if lines_cleared == 0 && tiles_dropped == 0 {
                break;
            }
        }
        report.points = self.score - before;
        report
    }

    /// Check every stored tile position matches its cell.
    pub fn positions_in_sync(&self) -> bool {
        self.tiles()
            .all(|(row, col, tile)| tile.position() == Position::new(col, row))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_config(BoardConfig::default())
    }
}
