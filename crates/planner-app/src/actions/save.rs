//! Save-to-tab calls and the on-device strategy store.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use planner_core::prelude::*;
use planner_core::{ContentStrategyPlanOutput, PlanItemRef, StrategyConfig};

use crate::message::{Message, SaveTarget};
use crate::services::{PlannerBackend, PlannerStore, SaveRecord, StrategyRecord};

fn outcome(target: SaveTarget, title: String, result: Result<String>) -> Message {
    match result {
        Ok(record_id) => {
            info!("Saved {:?} as {}", target, record_id);
            Message::Saved {
                target,
                record_id,
                title,
            }
        }
        Err(e) => {
            warn!("Save of {:?} failed: {}", target, e);
            Message::SaveFailed {
                target,
                error: e.to_string(),
            }
        }
    }
}

pub(super) fn spawn_save_strategy<B: PlannerBackend>(
    backend: Arc<B>,
    user_id: String,
    record: StrategyRecord,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        let title = record.title.clone();
        let result = backend.save_strategy(&user_id, record).await;
        let _ = msg_tx
            .send(outcome(SaveTarget::Strategy, title, result))
            .await;
    });
}

pub(super) fn spawn_save_item<B: PlannerBackend>(
    backend: Arc<B>,
    user_id: String,
    target: PlanItemRef,
    record: SaveRecord,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        let (title, result) = match record {
            SaveRecord::Pillar(pillar) => {
                let title = pillar.name.clone();
                (title, backend.save_pillar(&user_id, pillar).await)
            }
            SaveRecord::Item(item) => {
                let title = item.title.clone();
                (title, backend.save_plan_item(&user_id, item).await)
            }
        };
        let _ = msg_tx
            .send(outcome(SaveTarget::Item(target), title, result))
            .await;
    });
}

pub(super) fn spawn_store_locally(
    store: Arc<PlannerStore>,
    config: StrategyConfig,
    plan: ContentStrategyPlanOutput,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        let msg = match store.save_strategy(&config, &plan, Utc::now()) {
            Ok(saved) => {
                debug!("Stored strategy {} on this device", saved.id);
                Message::StrategyStoredLocally {
                    saved_count: store.saved_strategies().len(),
                }
            }
            Err(e) => {
                error!("Failed to store strategy: {}", e);
                Message::OperationFailed {
                    operation: "Saving on this device".to_string(),
                    error: e.to_string(),
                }
            }
        };
        let _ = msg_tx.send(msg).await;
    });
}
