//! Template gallery handlers

use planner_core::prelude::*;
use planner_core::{find_template, PlannerEvent};

use crate::gallery::{load_template, TemplateLoad};
use crate::notice::Notice;
use crate::state::{AppState, StrategyFocus, View};

use super::UpdateResult;

pub fn handle_load_selected(state: &mut AppState) -> UpdateResult {
    match state.gallery.selected_template() {
        Some(template) => handle_load_template(state, template.id),
        None => UpdateResult::none(),
    }
}

/// Merge a template into the config, or ask the host to show the upgrade
/// flow when the account cannot use its tier.
pub fn handle_load_template(state: &mut AppState, id: &str) -> UpdateResult {
    match load_template(id, &state.access) {
        TemplateLoad::Applied(patch) => {
            patch.apply_to(&mut state.config);
            let name = find_template(id).map_or(id, |t| t.name);
            info!("Applied template '{}'", id);

            state.emit(PlannerEvent::TemplateApplied {
                template_id: id.to_string(),
            });
            state.emit(PlannerEvent::ConfigChanged);
            state.notify(Notice::success(format!("Loaded the \"{}\" template", name)));
            state.view = View::Strategy;
            state.focus = StrategyFocus::Form;
        }
        TemplateLoad::UpgradeRequired(tier) => {
            let name = find_template(id).map_or(id, |t| t.name);
            state.host.upgrade();
            state.notify_error(&Error::upgrade_required(
                format!("The \"{}\" template", name),
                tier.label(),
            ));
        }
        TemplateLoad::NotFound => {
            state.notify_error(&Error::template_not_found(id));
        }
    }
    UpdateResult::none()
}
