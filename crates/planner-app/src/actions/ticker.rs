//! Analytics refresh ticker.
//!
//! At most one ticker runs. It sends [`Message::AnalyticsTick`] every
//! interval until stopped, the engine shuts down, or the message channel
//! closes.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

use planner_core::prelude::*;

use crate::message::Message;

use super::TickerSlot;

/// Minimum refresh interval
pub(crate) const TICK_MIN_SECS: u64 = 1;

pub(super) fn start_ticker(
    slot: &TickerSlot,
    interval_secs: u64,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());
    if guard.as_ref().is_some_and(|h| !h.is_finished()) {
        debug!("Analytics ticker already running");
        return;
    }

    let period = Duration::from_secs(interval_secs.max(TICK_MIN_SECS));
    info!("Starting analytics ticker every {:?}", period);

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if msg_tx.send(Message::AnalyticsTick).await.is_err() {
                        break;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("Analytics ticker stopped");
    });
    *guard = Some(handle);
}

pub(super) fn stop_ticker(slot: &TickerSlot) {
    let handle = slot.lock().unwrap_or_else(|e| e.into_inner()).take();
    if let Some(handle) = handle {
        handle.abort();
        info!("Stopped analytics ticker");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test(start_paused = true)]
    async fn test_ticker_sends_ticks_until_stopped() {
        let slot: TickerSlot = Arc::new(Mutex::new(None));
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let (tx, mut rx) = mpsc::channel(8);

        start_ticker(&slot, 30, tx.clone(), shutdown_rx.clone());
        // Second start is a no-op
        start_ticker(&slot, 30, tx, shutdown_rx);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(matches!(rx.recv().await, Some(Message::AnalyticsTick)));

        stop_ticker(&slot);
        assert!(slot.lock().unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_exits_on_shutdown() {
        let slot: TickerSlot = Arc::new(Mutex::new(None));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (tx, mut rx) = mpsc::channel(8);

        start_ticker(&slot, 5, tx, shutdown_rx);
        shutdown_tx.send(true).unwrap();

        // The task drops its sender when it exits
        assert!(rx.recv().await.is_none());
    }
}
