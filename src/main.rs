//! Blockfall terminal runner (default binary).
//!
//! One thread captures raw input bytes into a queue; the main loop pops them,
//! applies gravity on a wall-clock interval and redraws whenever the board
//! changes.

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};

use blockfall::core::{GameState, GravityClock, TickOutcome};
use blockfall::input::{InputCommand, InputQueue, InputTranslator};
use blockfall::term::{GameView, Screen, TerminalRenderer};
use blockfall::types::{GameAction, BOARD_HEIGHT, BOARD_WIDTH};
use blockfall::{AppConfig, EventLog, LogEvent};

/// How long to wait for input while gravity is stopped
const IDLE_WAIT: Duration = Duration::from_millis(100);

fn main() {
    if let Err(e) = try_main() {
        eprintln!("blockfall: {e:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let config = AppConfig::from_env();
    // Bad bindings are reported before the terminal changes mode.
    let translator = InputTranslator::new(&config.key_bindings()?)?;
    let mut log = EventLog::open(config.log_path.as_deref());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &translator, &mut log);
    let restored = term.exit();
    finish(result, restored)
}

/// Combine the game loop's outcome with the terminal restore.
///
/// A loop error wins; a failed restore rides along as its context.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Ok(()), restored) => restored.context("failed to restore the terminal"),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(restore)) => Err(e).with_context(|| format!("terminal restore also failed: {restore:#}")),
    }
}

struct Frame {
    view: GameView,
    screen: Screen,
}

impl Frame {
    fn redraw(&mut self, term: &mut TerminalRenderer, game: &GameState, paused: bool) -> Result<()> {
        self.view.render_into(game, paused, &mut self.screen)?;
        term.draw(&self.screen)
    }
}

fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    translator: &InputTranslator,
    log: &mut EventLog,
) -> Result<()> {
    let view = GameView::default();
    let (need_w, need_h) = view.required_size(BOARD_WIDTH, BOARD_HEIGHT);
    let (w, h) = term.size()?;
    if w < need_w || h < need_h {
        bail!("terminal is {w}x{h}, need at least {need_w}x{need_h}");
    }
    let mut frame = Frame {
        view,
        screen: Screen::new(need_w, need_h, ' '),
    };

    let seed = config.seed();
    let mut game = GameState::new(BOARD_WIDTH, BOARD_HEIGHT, seed);
    let mut clock = GravityClock::new(config.gravity, Instant::now());
    let queue = InputQueue::stdin()?;

    log.record(&LogEvent::Start {
        seed,
        width: BOARD_WIDTH,
        height: BOARD_HEIGHT,
        gravity_ms: config.gravity.as_millis() as u64,
    });
    frame.redraw(term, &game, false)?;

    loop {
        let wait = if clock.is_paused() || game.game_over() {
            IDLE_WAIT
        } else {
            clock.remaining(Instant::now())
        };

        if let Some(byte) = queue.pop_timeout(wait) {
            match translator.translate(byte) {
                Some(InputCommand::Quit) => {
                    log.record(&LogEvent::Quit {
                        score: game.score(),
                        lines: game.lines(),
                    });
                    return Ok(());
                }
                Some(InputCommand::Action(GameAction::Pause)) => {
                    if !game.game_over() {
                        let paused = clock.toggle_pause(Instant::now());
                        frame.redraw(term, &game, paused)?;
                    }
                }
                Some(InputCommand::Action(action)) => {
                    if !clock.is_paused() && game.apply_action(action) {
                        record_lock(&mut game, log);
                        frame.redraw(term, &game, false)?;
                    }
                }
                None => {}
            }
        }

        if !game.game_over() && clock.poll(Instant::now()) {
            if let TickOutcome::Locked(_) = game.tick() {
                record_lock(&mut game, log);
            }
            frame.redraw(term, &game, false)?;
        }
    }
}

fn record_lock(game: &mut GameState, log: &mut EventLog) {
    let Some(report) = game.take_last_lock() else {
        return;
    };
    if report.game_over {
        log.record(&LogEvent::GameOver {
            score: game.score(),
            lines: game.lines(),
            pieces: game.pieces_locked(),
        });
    } else {
        log.record(&LogEvent::Lock {
            rows_cleared: report.rows_cleared,
            points: report.points,
            score: game.score(),
            lines: game.lines(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::anyhow;

    #[test]
    fn test_finish_reports_restore_failure_after_clean_run() {
        let err = finish(Ok(()), Err(anyhow!("tty gone"))).unwrap_err();
        assert_eq!(format!("{err:#}"), "failed to restore the terminal: tty gone");
    }

    #[test]
    fn test_finish_keeps_run_error_and_restore_error() {
        let err = finish(Err(anyhow!("draw failed")), Err(anyhow!("tty gone"))).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("draw failed"));
        assert!(message.contains("tty gone"));
        assert_eq!(err.root_cause().to_string(), "draw failed");
    }

    #[test]
    fn test_finish_passes_through() {
        assert!(finish(Ok(()), Ok(())).is_ok());
        let err = finish(Err(anyhow!("draw failed")), Ok(())).unwrap_err();
        assert_eq!(format!("{err:#}"), "draw failed");
    }
}
