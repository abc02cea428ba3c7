//! Headless mode runner - one generation pass without the TUI

use std::io::Write;
use std::time::Duration;

use tokio::sync::broadcast;

use planner_app::{Engine, Message, PlannerBackend};
use planner_core::prelude::*;
use planner_core::{EventEnvelope, ExportFormat, PlannerEvent};

use super::{HeadlessEvent, NdjsonWriter};

/// Slack on top of the service timeout before giving up on a result
const RESULT_GRACE: Duration = Duration::from_secs(5);

/// What to do in a headless run.
#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    /// Template id applied before the CLI fields
    pub template: Option<String>,
    pub niche: Option<String>,
    pub audience: Option<String>,
    pub export: Option<ExportFormat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessOutcome {
    pub generated: bool,
    pub exported: bool,
}

/// Run one headless pass, writing NDJSON lines to `out`.
///
/// Shuts the engine down before returning, so the final line is always the
/// `shutdown` event.
pub async fn run_headless<B, W>(
    engine: &mut Engine<B>,
    options: HeadlessOptions,
    out: W,
) -> Result<HeadlessOutcome>
where
    B: PlannerBackend,
    W: Write,
{
    info!("═══════════════════════════════════════════════════════");
    info!("Strategy Planner starting in HEADLESS mode");
    info!("Project: {}", engine.project_path().display());
    info!("═══════════════════════════════════════════════════════");

    let mut writer = NdjsonWriter::new(out);
    let mut events = engine.subscribe();
    writer.emit(&HeadlessEvent::started(&engine.project_path().display().to_string()));

    let wait = Duration::from_secs(engine.state.settings.generation.timeout_secs) + RESULT_GRACE;
    let mut outcome = HeadlessOutcome::default();

    apply_options(engine, &options);
    flush(engine, &mut events, &mut writer);

    engine.process_message(Message::GenerateStrategy);
    await_idle(engine, wait, |e| e.state.is_loading).await;
    outcome.generated = engine.state.plan().is_some();
    flush(engine, &mut events, &mut writer);

    if let Some(format) = options.export {
        if outcome.generated {
            engine.process_message(Message::Export(format));
            await_idle(engine, wait, |e| e.state.exporting).await;
            outcome.exported = flush(engine, &mut events, &mut writer);
        } else {
            writer.emit(&HeadlessEvent::error(
                "Skipping export: no strategy was generated".to_string(),
                false,
            ));
        }
    }

    engine.shutdown().await;
    flush(engine, &mut events, &mut writer);

    info!("Strategy Planner headless mode exiting");
    Ok(outcome)
}

/// Template first, then the explicit fields on top.
fn apply_options<B: PlannerBackend>(engine: &mut Engine<B>, options: &HeadlessOptions) {
    if let Some(id) = &options.template {
        engine.process_message(Message::LoadTemplate { id: id.clone() });
    }

    if options.niche.is_none() && options.audience.is_none() {
        return;
    }
    let mut config = engine.state.config.clone();
    if let Some(niche) = &options.niche {
        config.niche = niche.clone();
    }
    if let Some(audience) = &options.audience {
        config.target_audience = audience.clone();
    }
    engine.process_message(Message::SetStrategyConfig(Box::new(config)));
}

/// Feed background results into the engine until `busy` clears.
async fn await_idle<B, F>(engine: &mut Engine<B>, wait: Duration, busy: F)
where
    B: PlannerBackend,
    F: Fn(&Engine<B>) -> bool,
{
    while busy(engine) {
        match tokio::time::timeout(wait, engine.msg_rx.recv()).await {
            Ok(Some(msg)) => engine.process_message(msg),
            Ok(None) => {
                warn!("Message channel closed while waiting for a result");
                break;
            }
            Err(_) => {
                warn!("No result after {:?}, giving up", wait);
                break;
            }
        }
        if engine.should_quit() {
            break;
        }
    }
}

/// Write pending bus events, then the notices queued since the last flush.
///
/// Returns true if an export completed among the written events.
fn flush<B, W>(
    engine: &mut Engine<B>,
    events: &mut broadcast::Receiver<EventEnvelope>,
    writer: &mut NdjsonWriter<W>,
) -> bool
where
    B: PlannerBackend,
    W: Write,
{
    let mut exported = false;
    loop {
        match events.try_recv() {
            Ok(envelope) => {
                exported |= matches!(envelope.event, PlannerEvent::ExportCompleted { .. });
                writer.emit(&envelope);
            }
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                warn!("Headless output skipped {} events", n);
            }
            Err(_) => break,
        }
    }

    while let Some(notice) = engine.state.notices.dismiss() {
        writer.emit(&HeadlessEvent::notice(&notice));
    }
    exported
}
