//! Terminal runner (default binary).
//!
//! Each frame renders the board, waits for at most one key until the frame
//! deadline, applies it, then advances the game by one tick. Once the game is
//! over the loop stops ticking and blocks until a restart or quit key.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::info;

use tetris_2048::config::Config;
use tetris_2048::core::{GameSnapshot, GameState};
use tetris_2048::input::{handle_event, should_quit};
use tetris_2048::logging::setup_logging;
use tetris_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = Config::parse();
    let board = config.board().context("invalid board size")?;

    let _logger = match &config.log_dir {
        Some(dir) => Some(setup_logging(dir)?),
        None => None,
    };

    let seed = config.seed();
    info!(
        "starting {}x{} board, difficulty {}, seed {seed}",
        board.width,
        board.height,
        config.difficulty.as_str()
    );

    let mut game = GameState::new(board, config.difficulty, seed);
    game.start();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let restored = term.exit();
    result?;
    restored?;

    println!("Final score: {}", game.score());
    info!("exited with score {}", game.score());
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let deadline = Instant::now() + game.frame_delay();

        game.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // At most one input event per frame.
        let ready = match input_timeout(game, deadline) {
            Some(timeout) => event::poll(timeout).context("failed to poll terminal events")?,
            None => true,
        };
        if ready {
            let ev = event::read().context("failed to read terminal event")?;
            match &ev {
                Event::Key(key) if should_quit(*key) => return Ok(()),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
            if let Some(action) = handle_event(&ev) {
                game.apply_action(action);
            }
            // Keep the frame rate steady when a key arrives early.
            let rest = deadline.saturating_duration_since(Instant::now());
            if !rest.is_zero() {
                std::thread::sleep(rest);
            }
        }

        if !game.game_over() {
            game.tick();
        }
    }
}

/// How long to wait for input this frame. `None` blocks until the next
/// event: a finished game only changes on restart or quit.
fn input_timeout(game: &GameState, deadline: Instant) -> Option<Duration> {
    if game.game_over() {
        None
    } else {
        Some(deadline.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_2048::core::TickOutcome;
    use tetris_2048::types::{BoardConfig, Difficulty, GameAction};

    #[test]
    fn test_finished_game_blocks_for_input() {
        let config = BoardConfig::new(4, 4).unwrap();
        let mut game = GameState::new(config, Difficulty::Fast, 99);
        game.start();
        let deadline = Instant::now() + game.frame_delay();
        assert!(input_timeout(&game, deadline).is_some());

        for _ in 0..10_000 {
            game.apply_action(GameAction::HardDrop);
            if game.tick() == TickOutcome::GameOver {
                break;
            }
        }
        assert!(game.game_over());
        assert_eq!(input_timeout(&game, deadline), None);

        assert!(game.apply_action(GameAction::Restart));
        assert!(input_timeout(&game, deadline).is_some());
    }
}
