//! Topic tracker handlers. The refresh ticker runs only while at least one
//! topic is tracked.

use chrono::Utc;
use uuid::Uuid;

use planner_core::prelude::*;

use crate::notice::Notice;
use crate::state::AppState;
use crate::tracker::TrackOutcome;

use super::{UpdateAction, UpdateResult};

pub fn handle_track_input(state: &mut AppState) -> UpdateResult {
    let name = std::mem::take(&mut state.tracker.input);
    handle_track(state, &name)
}

pub fn handle_track(state: &mut AppState, name: &str) -> UpdateResult {
    let history_days = state.settings.analytics.history_days;
    let outcome = state
        .tracker
        .track(name, Utc::now(), history_days, &mut state.rng);

    match outcome {
        TrackOutcome::Added(id) => {
            debug!("Tracking topic '{}' ({})", name.trim(), id);
            start_ticker_if_idle(state)
        }
        TrackOutcome::Blank => {
            state.notify(Notice::info("Type a topic name to track it"));
            UpdateResult::none()
        }
        TrackOutcome::Duplicate => {
            state.notify(Notice::info(format!(
                "\"{}\" is already being tracked",
                name.trim()
            )));
            UpdateResult::none()
        }
    }
}

pub fn handle_remove(state: &mut AppState, id: Uuid) -> UpdateResult {
    if state.tracker.remove(id, Utc::now()).is_none() {
        return UpdateResult::none();
    }
    stop_ticker_if_empty(state)
}

pub fn handle_remove_selected(state: &mut AppState) -> UpdateResult {
    match state.tracker.selected_topic().map(|t| t.id) {
        Some(id) => handle_remove(state, id),
        None => UpdateResult::none(),
    }
}

pub fn handle_tick(state: &mut AppState) -> UpdateResult {
    if state.tracker.is_empty() {
        return stop_ticker_if_empty(state);
    }
    state.tracker.tick(Utc::now(), &mut state.rng);
    UpdateResult::none()
}

fn start_ticker_if_idle(state: &mut AppState) -> UpdateResult {
    if state.tracker.ticker_running {
        return UpdateResult::none();
    }
    state.tracker.ticker_running = true;
    UpdateResult::action(UpdateAction::StartAnalyticsTicker {
        interval_secs: state.settings.analytics.refresh_interval_secs,
    })
}

fn stop_ticker_if_empty(state: &mut AppState) -> UpdateResult {
    if !state.tracker.is_empty() || !state.tracker.ticker_running {
        return UpdateResult::none();
    }
    state.tracker.ticker_running = false;
    UpdateResult::action(UpdateAction::StopAnalyticsTicker)
}
