//! Generation and regeneration calls, bounded by the service timeout.
//!
//! A timeout is reported the same way as a service failure, so the
//! regeneration path releases its credit reservation either way.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use planner_core::prelude::*;
use planner_core::{ItemStamp, StrategyConfig};

use crate::message::Message;
use crate::services::{PlannerBackend, RegenerationRequest, ReservationId};

pub(super) fn spawn_generation<B: PlannerBackend>(
    backend: Arc<B>,
    config: StrategyConfig,
    timeout: Duration,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        let result = tokio::time::timeout(timeout, backend.generate_strategy(&config)).await;

        let msg = match result {
            Ok(Ok(plan)) => Message::StrategyGenerated {
                plan: Box::new(plan),
            },
            Ok(Err(e)) => {
                warn!("Strategy generation failed: {}", e);
                Message::StrategyGenerationFailed {
                    error: e.to_string(),
                }
            }
            Err(_) => {
                let e = Error::timeout("Strategy generation", timeout.as_secs());
                warn!("{}", e);
                Message::StrategyGenerationFailed {
                    error: e.to_string(),
                }
            }
        };
        let _ = msg_tx.send(msg).await;
    });
}

pub(super) fn spawn_regeneration<B: PlannerBackend>(
    backend: Arc<B>,
    request: RegenerationRequest,
    reservation: ReservationId,
    expected: ItemStamp,
    timeout: Duration,
    msg_tx: mpsc::Sender<Message>,
) {
    let target = request.target;
    tokio::spawn(async move {
        let result = tokio::time::timeout(timeout, backend.regenerate_item(request)).await;

        let msg = match result {
            Ok(Ok(item)) => Message::ItemRegenerated {
                target,
                reservation,
                expected,
                item: Box::new(item),
            },
            Ok(Err(e)) => Message::ItemRegenerationFailed {
                target,
                reservation,
                error: e.to_string(),
            },
            Err(_) => Message::ItemRegenerationFailed {
                target,
                reservation,
                error: Error::timeout("Regeneration", timeout.as_secs()).to_string(),
            },
        };
        if msg_tx.send(msg).await.is_err() {
            debug!("Engine gone before regeneration of {} finished", target);
        }
    });
}
