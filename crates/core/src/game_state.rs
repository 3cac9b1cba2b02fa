//! Game state module - one play session
//!
//! Ties the board, the current and next pieces and the random source together.
//! Each frame the front end applies at most one [`GameAction`] and then calls
//! [`GameState::tick`] once. A tick moves the current piece down one row; when
//! it cannot move it is committed, the board settles completely, and the next
//! piece takes over. Nothing observes the board between commit and the end of
//! the settle pass.

use std::time::Duration;

use log::{debug, info};

use crate::board::{Board, SettleReport};
use crate::rng::{random_kind, SimpleRng};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::tetromino::Tetromino;
use crate::types::{BoardConfig, Difficulty, GameAction, MoveDirection, RotationDirection};

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused, over, or not started
    Idle,
    /// The current piece fell one row
    Moved,
    /// The piece landed, the board settled and the next piece spawned
    Landed(SettleReport),
    /// The piece landed above the board
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    config: BoardConfig,
    difficulty: Difficulty,
    board: Board,
    current: Option<Tetromino>,
    next: Tetromino,
    rng: SimpleRng,
    seed: u32,
    started: bool,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    pieces_spawned: u32,
    frame: u64,
    last_settle: Option<SettleReport>,
}

impl GameState {
    /// Create a session. The first piece is generated but not yet spawned.
    pub fn new(config: BoardConfig, difficulty: Difficulty, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Tetromino::new(random_kind(&mut rng), config.width, config.height, &mut rng);

        Self {
            config,
            difficulty,
            board: Board::from_config(config),
            current: None,
            next,
            rng,
            seed,
            started: false,
            episode_id: 0,
            pieces_spawned: 0,
            frame: 0,
            last_settle: None,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    /// Promote the preview piece to current and generate a new preview.
    fn spawn_piece(&mut self) {
        let fresh = Tetromino::new(
            random_kind(&mut self.rng),
            self.config.width,
            self.config.height,
            &mut self.rng,
        );
        let mut piece = std::mem::replace(&mut self.next, fresh);
        piece.position(&mut self.rng);
        debug!(
            "spawned {:?} at column {}, next is {:?}",
            piece.kind(),
            piece.bottom_left_corner().x,
            self.next.kind()
        );
        self.current = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
    }

    /// Commit the current piece, settle the board and spawn the next one.
    fn land(&mut self) -> TickOutcome {
        let Some(piece) = self.current.take() else {
            return TickOutcome::Idle;
        };

        if self.board.commit(piece) {
            info!(
                "game over after {} pieces, final score {}",
                self.pieces_spawned,
                self.board.score()
            );
            return TickOutcome::GameOver;
        }

        let report = self.board.settle();
        self.last_settle = Some(report);
        self.spawn_piece();
        TickOutcome::Landed(report)
    }

    /// Advance one gravity step.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.started || self.board.paused() || self.board.game_over() {
            return TickOutcome::Idle;
        }
        self.frame = self.frame.wrapping_add(1);

        let moved = match self.current.as_mut() {
            Some(piece) => piece.try_move(MoveDirection::Down, &self.board),
            None => return TickOutcome::Idle,
        };

        if moved {
            TickOutcome::Moved
        } else {
            self.land()
        }
    }

    fn move_current(&mut self, direction: MoveDirection) -> bool {
        match self.current.as_mut() {
            Some(piece) => piece.try_move(direction, &self.board),
            None => false,
        }
    }

    fn rotate_current(&mut self, direction: RotationDirection) -> bool {
        match self.current.as_mut() {
            Some(piece) => piece.try_rotate(direction, &self.board),
            None => false,
        }
    }

    /// Apply a game action
    ///
    /// Pause and restart are always accepted (pause is refused once the game
    /// is over). Piece actions are refused while paused or over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if self.board.game_over() {
                    return false;
                }
                let paused = self.board.toggle_pause();
                debug!("paused: {paused}");
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if !self.started || self.board.paused() || self.board.game_over() => false,
            GameAction::MoveLeft => self.move_current(MoveDirection::Left),
            GameAction::MoveRight => self.move_current(MoveDirection::Right),
            GameAction::SoftDrop => self.move_current(MoveDirection::Down),
            GameAction::RotateCw => self.rotate_current(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.rotate_current(RotationDirection::CounterClockwise),
            GameAction::HardDrop => match self.current.as_mut() {
                // Landing happens on the next tick, like any other piece.
                Some(piece) => {
                    piece.hard_drop(&self.board);
                    true
                }
                None => false,
            },
        }
    }

    /// Discard everything and start a fresh session with the same settings.
    ///
    /// The new seed continues the current random sequence so restarts do not
    /// replay the same game.
    pub fn restart(&mut self) {
        let seed = self.rng.state();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(self.config, self.difficulty, seed);
        self.episode_id = next_episode;
        self.start();
        info!("restarted, episode {next_episode}");
    }

    /// Delay between two frames for this session's difficulty.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.difficulty.frame_ms()))
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn game_over(&self) -> bool {
        self.board.game_over()
    }

    pub fn paused(&self) -> bool {
        self.board.paused()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_settle(&self) -> Option<SettleReport> {
        self.last_settle
    }

    /// Fill `out` with the render-facing state, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend(
            self.board
                .cells()
                .iter()
                .map(|cell| cell.as_ref().map_or(0, |tile| tile.value())),
        );
        out.active = self.current.as_ref().map(PieceSnapshot::absolute);
        out.next = Some(PieceSnapshot::relative(&self.next));
        out.score = self.board.score();
        out.paused = self.board.paused();
        out.game_over = self.board.game_over();
        out.difficulty = self.difficulty;
        out.episode_id = self.episode_id;
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(BoardConfig::default(), Difficulty::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(BoardConfig::default(), Difficulty::Medium, seed);
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(BoardConfig::default(), Difficulty::Fast, 12345);
        assert!(!state.started);
        assert!(state.current.is_none());
        assert_eq!(state.score(), 0);
        assert_eq!(state.episode_id, 0);
        assert_eq!(state.frame_delay(), Duration::from_millis(120));
    }

    #[test]
    fn test_start_spawns_above_board() {
        let state = started(12345);
        let piece = state.current().unwrap();
        assert_eq!(piece.bottom_left_corner().y, 20);
        assert_eq!(state.pieces_spawned(), 1);
    }

    #[test]
    fn test_tick_idle_before_start() {
        let mut state = GameState::default();
        assert_eq!(state.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut state = started(7);
        let y = state.current().unwrap().bottom_left_corner().y;
        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.current().unwrap().bottom_left_corner().y, y - 1);
        assert_eq!(state.frame(), 1);
    }

    #[test]
    fn test_hard_drop_lands_on_next_tick() {
        let mut state = started(7);
        let first_next = state.next().kind();
        assert!(state.apply_action(GameAction::HardDrop));
        assert!(state.current().unwrap().is_grounded(state.board()));

        match state.tick() {
            TickOutcome::Landed(_) => {}
            other => panic!("expected landing, got {other:?}"),
        }
        assert_eq!(state.current().unwrap().kind(), first_next);
        assert_eq!(state.pieces_spawned(), 2);
        assert!(state.board().occupied_count() > 0);
    }

    #[test]
    fn test_pause_blocks_ticks_and_moves() {
        let mut state = started(3);
        assert!(state.apply_action(GameAction::Pause));
        assert!(state.paused());
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::HardDrop));

        assert!(state.apply_action(GameAction::Pause));
        assert!(!state.paused());
        assert_eq!(state.tick(), TickOutcome::Moved);
    }

    #[test]
    fn test_restart_increments_episode_id() {
        let mut state = started(12345);
        state.apply_action(GameAction::HardDrop);
        state.tick();
        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.episode_id(), 1);
        assert!(state.started());
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.pieces_spawned(), 1);
    }

    #[test]
    fn test_game_over_when_stack_reaches_top() {
        let config = BoardConfig::new(4, 4).unwrap();
        let mut state = GameState::new(config, Difficulty::Fast, 99);
        state.start();
        let mut outcome = TickOutcome::Idle;
        for _ in 0..10_000 {
            state.apply_action(GameAction::HardDrop);
            outcome = state.tick();
            if outcome == TickOutcome::GameOver {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::GameOver);
        assert!(state.game_over());
        assert!(state.current().is_none());
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert!(!state.apply_action(GameAction::Pause));
    }

    #[test]
    fn test_full_top_row_ends_game() {
        let mut state = started(5);
        let top = state.board().height() as i32 - 1;
        let width = state.board().width() as i32;
        for col in 0..width {
            let value = if col % 2 == 0 { 2 } else { 4 };
            state.board_mut().place(top, col, value);
        }
        // The piece cannot enter the board, so it lands above it.
        let mut outcome = state.tick();
        while outcome == TickOutcome::Moved {
            outcome = state.tick();
        }
        assert_eq!(outcome, TickOutcome::GameOver);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = started(11);
        state.board_mut().place(0, 0, 64);
        let snap = state.snapshot();
        assert_eq!(snap.width, 12);
        assert_eq!(snap.height, 20);
        assert_eq!(snap.value_at(0, 0), Some(64));
        assert_eq!(snap.value_at(1, 0), None);
        assert_eq!(snap.active.as_ref().unwrap().tiles.len(), 4);
        assert_eq!(snap.next.as_ref().unwrap().kind, state.next().kind());
        assert_eq!(snap.difficulty, Difficulty::Medium);
    }
}
