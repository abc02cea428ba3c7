//! Strategy form edits and the generation trigger

use planner_core::prelude::*;
use planner_core::{ContentStrategyPlanOutput, PlannerEvent, StrategyConfig, MAX_GOALS};

use crate::form::{FieldKind, FormField};
use crate::notice::Notice;
use crate::state::AppState;

use super::{plan, UpdateAction, UpdateResult};

fn config_changed(state: &mut AppState) {
    state.emit(PlannerEvent::ConfigChanged);
}

/// Replace the whole config, as a host push does.
pub fn handle_set_config(state: &mut AppState, config: StrategyConfig) -> UpdateResult {
    state.config = config;
    config_changed(state);
    UpdateResult::none()
}

pub fn handle_focus(state: &mut AppState, forward: bool) -> UpdateResult {
    if forward {
        state.form.focus_next();
    } else {
        state.form.focus_previous();
    }
    UpdateResult::none()
}

/// Left/Right: cycle single-choice fields, move the cursor in multi-selects.
pub fn handle_option(state: &mut AppState, forward: bool) -> UpdateResult {
    let field = state.form.focus;
    match field.kind() {
        FieldKind::Choice => {
            if field.cycle(&mut state.config, forward) {
                config_changed(state);
            }
        }
        FieldKind::MultiSelect => state.form.move_option(forward),
        FieldKind::Toggle => {
            if field.toggle_option(&mut state.config, 0) {
                config_changed(state);
            }
        }
        FieldKind::Text => {}
    }
    UpdateResult::none()
}

pub fn handle_toggle(state: &mut AppState) -> UpdateResult {
    let field = state.form.focus;
    let changed = match field.kind() {
        FieldKind::MultiSelect => field.toggle_option(&mut state.config, state.form.option_cursor),
        FieldKind::Toggle => field.toggle_option(&mut state.config, 0),
        FieldKind::Choice => field.cycle(&mut state.config, true),
        FieldKind::Text => false,
    };

    if changed {
        config_changed(state);
    } else if field == FormField::Goals {
        state.notify(Notice::info(format!(
            "You can pick up to {} goals. Deselect one first.",
            MAX_GOALS
        )));
    }
    UpdateResult::none()
}

pub fn handle_input(state: &mut AppState, c: char) -> UpdateResult {
    if state.form.focus.push_char(&mut state.config, c) {
        config_changed(state);
    }
    UpdateResult::none()
}

pub fn handle_backspace(state: &mut AppState) -> UpdateResult {
    if state.form.focus.backspace(&mut state.config) {
        config_changed(state);
    }
    UpdateResult::none()
}

pub fn handle_clear_field(state: &mut AppState) -> UpdateResult {
    if state.form.focus.clear(&mut state.config) {
        config_changed(state);
    }
    UpdateResult::none()
}

/// Start a generation. At most one runs at a time.
pub fn handle_generate(state: &mut AppState) -> UpdateResult {
    if state.is_loading {
        debug!("Generation already in progress, ignoring");
        return UpdateResult::none();
    }

    if !state.config.can_generate() {
        let missing = state.config.missing_fields().join(" and ");
        state.notify_error(&Error::invalid_config(format!("{} required", missing)));
        return UpdateResult::none();
    }

    state.is_loading = true;
    state.error = None;
    info!("Generating strategy for '{}'", state.config.niche.trim());

    UpdateResult::action(UpdateAction::GenerateStrategy {
        config: Box::new(state.config.clone()),
    })
}

pub fn handle_generated(state: &mut AppState, new_plan: ContentStrategyPlanOutput) -> UpdateResult {
    state.is_loading = false;
    plan::replace_plan(state, new_plan);

    let generation = state.document.as_ref().map_or(0, |d| d.generation());
    info!("Strategy generated (generation {})", generation);
    state.emit(PlannerEvent::PlanGenerated { generation });
    UpdateResult::none()
}

pub fn handle_generation_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.is_loading = false;
    state.notify(Notice::failed(format!("Failed to generate strategy: {}", error)));
    state.error = Some(error);
    UpdateResult::none()
}
