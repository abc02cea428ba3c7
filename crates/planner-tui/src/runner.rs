//! TUI runner - terminal lifecycle and the main event loop

use planner_app::{Engine, PlannerBackend};
use planner_core::prelude::*;

use super::{event, render, terminal};

/// Run the TUI against an engine until the user quits.
///
/// The terminal is restored and the engine shut down on every exit path,
/// including a failed draw.
pub async fn run<B: PlannerBackend>(engine: &mut Engine<B>) -> Result<()> {
    terminal::install_panic_hook();

    let mut term = ratatui::init();
    info!("Strategy Planner TUI started in {}", engine.project_path().display());

    let result = run_loop(&mut term, engine);

    engine.shutdown().await;
    ratatui::restore();

    if let Err(e) = &result {
        error!("TUI loop failed: {}", e);
    }
    result
}

/// Main event loop
fn run_loop<B: PlannerBackend>(
    terminal: &mut ratatui::DefaultTerminal,
    engine: &mut Engine<B>,
) -> Result<()> {
    while !engine.should_quit() {
        // Results from background tasks, signals and the ticker
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}
