//! Terminal Digris runner (default binary).
//!
//! The game is turn-based: the loop blocks on the next terminal event, applies
//! the mapped intent, and redraws from a fresh snapshot.
//!
//! Environment:
//! - `DIGRIS_LOG=<file>`: write debug logs to `<file>`
//! - `DIGRIS_SEED`, `DIGRIS_WIDTH`, `DIGRIS_HEIGHT`, `DIGRIS_SCROLL_GATE`:
//!   see [`EngineConfig::from_env`]

use std::fs::File;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use digris::core::{EngineConfig, Session, StepOutcome};
use digris::input::{handle_key_event, should_quit};
use digris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    setup_logging()?;

    let config = EngineConfig::from_env();
    let mut session = Session::new(config).context("invalid engine configuration")?;
    if !session.start() {
        anyhow::bail!("the first mino could not spawn");
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to a file; the terminal belongs to the renderer.
fn setup_logging() -> Result<()> {
    let Ok(path) = std::env::var("DIGRIS_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;
    WriteLogger::init(
        LevelFilter::Debug,
        ConfigBuilder::new()
            .set_target_level(LevelFilter::Error)
            .build(),
        file,
    )
    .context("installing logger")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::new();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(intent) = handle_key_event(key) {
                    if let StepOutcome::Settled(report) = session.apply(intent) {
                        log::trace!("settled: {:?}", report);
                    }
                    // This renderer redraws from snapshots; events are only
                    // drained so the buffer stays bounded.
                    session.take_events();
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
