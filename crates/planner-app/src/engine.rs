//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the planner state, the message channel, the shutdown
//! signal, the action context and the event bus. Front ends feed it
//! messages and render `engine.state`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};

use planner_core::prelude::*;
use planner_core::{EventEnvelope, PlannerEvent};

use crate::actions::ActionContext;
use crate::config::{self, Settings};
use crate::message::Message;
use crate::process;
use crate::services::{
    LocalCreditLedger, OfflineBackend, PlannerBackend, PlannerStore, RecordingHost,
};
use crate::signals;
use crate::state::{AppState, Services};

/// Orchestration engine for Strategy Planner.
///
/// Encapsulates all shared state between TUI and headless runners:
/// - TEA state management
/// - Message channel
/// - Shutdown signaling
/// - Service backend and action context
/// - Event broadcasting for external consumers
pub struct Engine<B: PlannerBackend = OfflineBackend> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    pub shutdown_rx: watch::Receiver<bool>,

    pub project_path: PathBuf,

    ctx: ActionContext<B>,

    event_tx: broadcast::Sender<EventEnvelope>,

    /// Sequence number of the next published event
    next_sequence: u64,
}

impl Engine<OfflineBackend> {
    /// Create an Engine for a project directory.
    ///
    /// Initializes `.planner/`, loads settings and delegates to
    /// [`Engine::from_settings`].
    pub fn new(project_path: PathBuf) -> Self {
        if let Err(e) = config::init_config_dir(&project_path) {
            warn!("Failed to initialize .planner directory: {}", e);
        }
        let settings = config::load_settings(&project_path);
        Self::from_settings(project_path, settings)
    }

    /// Create an Engine with the offline backend and the on-disk store.
    ///
    /// Falls back to an in-memory store when the data directory cannot be
    /// opened. Also spawns the OS signal handler.
    pub fn from_settings(project_path: PathBuf, settings: Settings) -> Self {
        let max_saved = settings.storage.max_saved_strategies;
        let data_dir = config::data_dir(&settings);
        let store = match PlannerStore::open(&data_dir, max_saved) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Using an in-memory store: {}", e);
                Arc::new(PlannerStore::in_memory(max_saved))
            }
        };

        let services = Services {
            credits: Arc::new(LocalCreditLedger::new(settings.credits.starting_balance)),
            host: Arc::new(RecordingHost::new()),
            store: store.clone(),
        };
        let backend = Arc::new(OfflineBackend::new(store));
        let state = AppState::with_services(settings, services);

        let engine = Self::with_backend(state, backend, project_path);
        signals::spawn_signal_handler(engine.msg_sender());
        engine
    }
}

impl<B: PlannerBackend> Engine<B> {
    /// Create an Engine around prepared state and a backend.
    pub fn with_backend(state: AppState, backend: Arc<B>, project_path: PathBuf) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        let settings = &state.settings;
        let active = settings.flags.active_overrides();
        if !active.is_empty() {
            warn!("Feature overrides active: {}", active.join(", "));
        }

        let ctx = ActionContext {
            backend,
            store: state.store.clone(),
            service_timeout: Duration::from_secs(settings.generation.timeout_secs),
            export_dir: config::export_dir(settings),
            open_in_browser: settings.export.open_in_browser,
            browser: settings.export.browser.clone(),
            shutdown_rx: shutdown_rx.clone(),
            ticker: Arc::new(Mutex::new(None)),
        };

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            project_path,
            ctx,
            event_tx,
            next_sequence: 1,
        }
    }

    /// Subscribe to planner events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle, then publish
    /// the events it produced.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.ctx);

        for event in self.state.take_events() {
            self.emit(event);
        }
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.ctx.backend
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Initiate shutdown: publish the final event and stop background tasks.
    pub async fn shutdown(&mut self) {
        self.emit(PlannerEvent::Shutdown);

        let _ = self.shutdown_tx.send(true);

        let ticker = self.ctx.ticker.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = ticker {
            match tokio::time::timeout(Duration::from_secs(2), handle).await {
                Ok(_) => debug!("Analytics ticker stopped"),
                Err(_) => warn!("Analytics ticker did not stop in time"),
            }
        }
        info!("Engine shut down");
    }

    /// Publish one event to all subscribers.
    ///
    /// send() returns Err only if there are no receivers, which is fine.
    fn emit(&mut self, event: PlannerEvent) {
        let envelope = EventEnvelope::new(self.next_sequence, event);
        self.next_sequence += 1;
        debug!(
            "Event #{}: {}",
            envelope.sequence,
            envelope.event.event_type()
        );
        let _ = self.event_tx.send(envelope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_utils::{ready_config, FakeBackend};

    fn test_engine(backend: FakeBackend) -> Engine<FakeBackend> {
        let mut state = AppState::new();
        state.config = ready_config();
        Engine::with_backend(state, Arc::new(backend), PathBuf::from("."))
    }

    async fn next_message(engine: &mut Engine<FakeBackend>) -> Message {
        tokio::time::timeout(Duration::from_secs(5), engine.msg_rx.recv())
            .await
            .expect("timed out waiting for a message")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_generation_round_trip_publishes_event() {
        let mut engine = test_engine(FakeBackend::new());
        let mut events = engine.subscribe();

        engine.process_message(Message::GenerateStrategy);
        assert!(engine.state.is_loading);

        let msg = next_message(&mut engine).await;
        engine.process_message(msg);

        assert!(engine.state.plan().is_some());
        assert_eq!(engine.backend().generate_calls().len(), 1);

        let envelope = events.recv().await.unwrap();
        assert_eq!(envelope.sequence, 1);
        assert_eq!(envelope.event, PlannerEvent::PlanGenerated { generation: 1 });
    }

    #[tokio::test]
    async fn test_generation_failure_reaches_state() {
        let mut engine = test_engine(FakeBackend::new().failing_generate("model offline"));

        engine.process_message(Message::GenerateStrategy);
        let msg = next_message(&mut engine).await;
        engine.process_message(msg);

        assert!(!engine.state.is_loading);
        assert!(engine.state.plan().is_none());
        assert!(engine
            .state
            .error
            .as_deref()
            .is_some_and(|e| e.contains("model offline")));
    }

    #[tokio::test]
    async fn test_shutdown_publishes_final_event() {
        let mut engine = test_engine(FakeBackend::new());
        let mut events = engine.subscribe();

        engine.shutdown().await;

        assert!(*engine.shutdown_rx.borrow());
        assert_eq!(events.recv().await.unwrap().event, PlannerEvent::Shutdown);
    }
}
