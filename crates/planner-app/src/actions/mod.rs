//! Action handlers: UpdateAction dispatch and background task spawning

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::handler::UpdateAction;
use crate::message::Message;
use crate::services::{PlannerBackend, PlannerStore};

pub(crate) mod clipboard;
pub(crate) mod export;
pub(crate) mod generation;
pub(crate) mod save;
pub(crate) mod ticker;

/// Slot holding the running analytics ticker, if any
pub type TickerSlot = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Everything the executor needs besides the action itself.
pub struct ActionContext<B> {
    pub backend: Arc<B>,
    pub store: Arc<PlannerStore>,
    /// Upper bound on a generation or regeneration call
    pub service_timeout: Duration,
    pub export_dir: PathBuf,
    pub open_in_browser: bool,
    pub browser: String,
    pub shutdown_rx: watch::Receiver<bool>,
    pub ticker: TickerSlot,
}

impl<B> Clone for ActionContext<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            store: self.store.clone(),
            service_timeout: self.service_timeout,
            export_dir: self.export_dir.clone(),
            open_in_browser: self.open_in_browser,
            browser: self.browser.clone(),
            shutdown_rx: self.shutdown_rx.clone(),
            ticker: self.ticker.clone(),
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<B: PlannerBackend>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    ctx: &ActionContext<B>,
) {
    match action {
        UpdateAction::GenerateStrategy { config } => {
            generation::spawn_generation(ctx.backend.clone(), *config, ctx.service_timeout, msg_tx);
        }

        UpdateAction::RegenerateItem {
            request,
            reservation,
            expected,
        } => {
            generation::spawn_regeneration(
                ctx.backend.clone(),
                *request,
                reservation,
                expected,
                ctx.service_timeout,
                msg_tx,
            );
        }

        UpdateAction::SaveStrategy { user_id, record } => {
            save::spawn_save_strategy(ctx.backend.clone(), user_id, *record, msg_tx);
        }

        UpdateAction::SaveItem {
            user_id,
            target,
            record,
        } => {
            save::spawn_save_item(ctx.backend.clone(), user_id, target, *record, msg_tx);
        }

        UpdateAction::StoreStrategyLocally { config, plan } => {
            save::spawn_store_locally(ctx.store.clone(), *config, *plan, msg_tx);
        }

        UpdateAction::CopyToClipboard { title, text } => {
            clipboard::spawn_copy(title, text, msg_tx);
        }

        UpdateAction::ExportStrategy {
            format,
            file_name,
            contents,
        } => {
            export::spawn_export(
                export::ExportJob {
                    format,
                    dir: ctx.export_dir.clone(),
                    file_name,
                    contents,
                    open_in_browser: ctx.open_in_browser,
                    browser: ctx.browser.clone(),
                },
                ctx.store.clone(),
                msg_tx,
            );
        }

        UpdateAction::StartAnalyticsTicker { interval_secs } => {
            ticker::start_ticker(&ctx.ticker, interval_secs, msg_tx, ctx.shutdown_rx.clone());
        }

        UpdateAction::StopAnalyticsTicker => {
            ticker::stop_ticker(&ctx.ticker);
        }
    }
}
