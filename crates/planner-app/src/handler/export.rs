//! Export gate and completion

use chrono::Utc;

use planner_core::prelude::*;
use planner_core::{ExportFormat, PlannerEvent};

use crate::export::{export_file_name, render};
use crate::notice::Notice;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// Render the plan and hand it to the executor, unless the free export
/// limit is used up.
pub fn handle_export(state: &mut AppState, format: ExportFormat) -> UpdateResult {
    if state.exporting {
        debug!("Export already in progress, ignoring");
        return UpdateResult::none();
    }
    let Some(plan) = state.plan() else {
        state.notify_error(&Error::NoStrategyPlan);
        return UpdateResult::none();
    };

    let limit = state.settings.export.free_export_limit;
    let used = state.store.export_count();
    if !state.access.is_premium() && used >= limit {
        state.notify_error(&Error::ExportLimitReached { used, limit });
        return UpdateResult::none();
    }

    let now = Utc::now();
    let contents = match render(
        format,
        &state.config,
        plan,
        state.settings.export.print_delay_ms,
        now,
    ) {
        Ok(contents) => contents,
        Err(e) => {
            state.notify(Notice::failed(format!(
                "Failed to export {}: {}",
                format.label(),
                e
            )));
            return UpdateResult::none();
        }
    };
    let file_name = export_file_name(&state.config.niche, format, now);

    state.exporting = true;
    UpdateResult::action(UpdateAction::ExportStrategy {
        format,
        file_name,
        contents,
    })
}

pub fn handle_export_completed(
    state: &mut AppState,
    format: ExportFormat,
    path: String,
    export_count: u32,
) -> UpdateResult {
    state.exporting = false;

    let mut message = format!("Exported {} to {}", format.label(), path);
    if !state.access.is_premium() {
        let limit = state.settings.export.free_export_limit;
        message.push_str(&format!(
            " ({} of {} free exports used)",
            export_count.min(limit),
            limit
        ));
    }
    state.emit(PlannerEvent::ExportCompleted { format, path });
    state.notify(Notice::success(message));
    UpdateResult::none()
}

pub fn handle_export_failed(state: &mut AppState, format: ExportFormat, error: String) -> UpdateResult {
    state.exporting = false;
    state.notify(Notice::failed(format!(
        "Failed to export {}: {}",
        format.label(),
        error
    )));
    UpdateResult::none()
}
