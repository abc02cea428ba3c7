//! Plan view handlers: navigation, item menus, regeneration, saves and the
//! synchronous host hand-offs.

use chrono::Utc;

use planner_core::prelude::*;
use planner_core::{
    ContentStrategyPlanOutput, ItemStamp, PlanCommand, PlanDocument, PlanItem, PlanItemRef,
    PlannerEvent,
};

use crate::menu::{ActionMenuState, ItemAction};
use crate::message::{Message, SaveTarget};
use crate::notice::Notice;
use crate::services::{
    CreditAction, RegenerationRequest, ReservationId, SaveRecord, StrategyRecord,
};
use crate::state::{AppState, PlanViewState, StrategyFocus};

use super::{UpdateAction, UpdateResult};

/// Install a new plan, bumping the generation if one was shown already.
///
/// In-flight regenerations stop flagging their items. They keep their stamps
/// and are rejected as stale when they complete.
pub(crate) fn replace_plan(state: &mut AppState, plan: ContentStrategyPlanOutput) {
    let next = match &state.document {
        Some(doc) => doc.apply(PlanCommand::ReplacePlan(plan)),
        None => Ok(PlanDocument::new(plan)),
    };
    match next {
        Ok(doc) => state.document = Some(doc),
        Err(e) => {
            warn!("Failed to replace plan: {}", e);
            return;
        }
    }
    state.plan_view = PlanViewState::default();
    state.action_menu = None;
    state.regenerating.clear();
}

/// A host pushed a plan directly.
pub fn handle_set_plan(state: &mut AppState, plan: ContentStrategyPlanOutput) -> UpdateResult {
    replace_plan(state, plan);
    UpdateResult::none()
}

/// Look up an item, queueing the matching notice when it cannot be acted on.
fn require_item(state: &mut AppState, target: PlanItemRef) -> Option<PlanItem> {
    let Some(plan) = state.plan() else {
        state.notify_error(&Error::NoStrategyPlan);
        return None;
    };
    match plan.item(target) {
        Some(item) => Some(item),
        None => {
            state.notify_error(&Error::item_not_found(target.kind(), target.index()));
            None
        }
    }
}

fn require_user(state: &mut AppState, action: &str) -> Option<String> {
    let user = state.user_id();
    if user.is_none() {
        state.notify_error(&Error::not_signed_in(action));
    }
    user
}

// ─────────────────────────────────────────────────────────
// Focus and navigation
// ─────────────────────────────────────────────────────────

pub fn handle_focus_plan(state: &mut AppState) -> UpdateResult {
    if state.plan().is_some() {
        state.focus = StrategyFocus::Plan;
    }
    UpdateResult::none()
}

pub fn handle_focus_form(state: &mut AppState) -> UpdateResult {
    state.focus = StrategyFocus::Form;
    state.action_menu = None;
    UpdateResult::none()
}

pub fn handle_select(state: &mut AppState, forward: bool) -> UpdateResult {
    let len = state.plan().map_or(0, |p| p.item_refs().len());
    state.action_menu = None;
    if len == 0 {
        return UpdateResult::none();
    }
    let current = state.plan_view.selected.min(len - 1);
    state.plan_view.selected = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    UpdateResult::none()
}

/// Jump to the first item of the next (or previous) section with items.
pub fn handle_section_jump(state: &mut AppState, forward: bool) -> UpdateResult {
    let Some(plan) = state.plan() else {
        return UpdateResult::none();
    };
    let refs = plan.item_refs();
    let Some(current) = state.selected_item() else {
        return UpdateResult::none();
    };
    let section = current.section();

    let target = if forward {
        refs.iter().position(|r| r.section() > section)
    } else {
        let previous_section = refs
            .iter()
            .map(|r| r.section())
            .filter(|s| *s < section)
            .max();
        previous_section.and_then(|s| refs.iter().position(|r| r.section() == s))
    };

    if let Some(pos) = target {
        state.plan_view.selected = pos;
        state.action_menu = None;
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Action menu
// ─────────────────────────────────────────────────────────

/// Open the menu for `target`, closing any other open menu.
pub fn handle_open_menu(state: &mut AppState, target: PlanItemRef) -> UpdateResult {
    let Some(plan) = state.plan() else {
        return UpdateResult::none();
    };
    let Some(pos) = plan.item_refs().iter().position(|r| *r == target) else {
        return UpdateResult::none();
    };
    state.plan_view.selected = pos;
    state.action_menu = Some(ActionMenuState::new(target));
    UpdateResult::none()
}

pub fn handle_menu_activate(state: &mut AppState) -> UpdateResult {
    match state.action_menu.take() {
        Some(menu) => UpdateResult::message(Message::ItemAction {
            target: menu.target,
            action: menu.current(),
        }),
        None => UpdateResult::none(),
    }
}

pub fn handle_item_action(
    state: &mut AppState,
    target: PlanItemRef,
    action: ItemAction,
) -> UpdateResult {
    state.action_menu = None;
    let msg = match action {
        ItemAction::SaveToTab => Message::SaveItem { target },
        ItemAction::Regenerate => Message::RegenerateItem { target },
        ItemAction::SendToCanvas => Message::SendToCanvas { target },
        ItemAction::CopyToClipboard => Message::CopyItem { target },
    };
    UpdateResult::message(msg)
}

// ─────────────────────────────────────────────────────────
// Regeneration
// ─────────────────────────────────────────────────────────

/// Check preconditions, reserve credits and dispatch a regeneration.
pub fn handle_regenerate(state: &mut AppState, target: PlanItemRef) -> UpdateResult {
    let Some(current) = require_item(state, target) else {
        return UpdateResult::none();
    };
    if require_user(state, "regenerate content").is_none() {
        return UpdateResult::none();
    }
    if state.is_regenerating(target) {
        debug!("Regeneration of {} already in flight, ignoring", target);
        return UpdateResult::none();
    }

    let cost = state.settings.credits.regenerate_cost;
    if !state.credits.can_afford(CreditAction::Regenerate, cost) {
        let available = state.credits.available();
        state.notify_error(&Error::InsufficientCredits {
            action: CreditAction::Regenerate.label().to_string(),
            required: cost,
            available,
        });
        return UpdateResult::none();
    }

    let reservation = match state.credits.reserve(CreditAction::Regenerate, cost) {
        Ok(id) => id,
        Err(e) => {
            state.notify_error(&e);
            return UpdateResult::none();
        }
    };

    let Some(doc) = state.document.as_ref() else {
        if let Err(e) = state.credits.release(reservation) {
            warn!("Failed to release reservation {}: {}", reservation, e);
        }
        return UpdateResult::none();
    };
    let expected = doc.stamp(target);
    let request = RegenerationRequest {
        plan: doc.plan().clone(),
        target,
        current,
        config: state.config.clone(),
    };

    state.regenerating.insert(target, reservation);
    info!("Regenerating {} (reservation {})", target, reservation);

    UpdateResult::action(UpdateAction::RegenerateItem {
        request: Box::new(request),
        reservation,
        expected,
    })
}

/// Apply a finished regeneration if the item is unchanged since dispatch.
pub fn handle_regenerated(
    state: &mut AppState,
    target: PlanItemRef,
    reservation: ReservationId,
    expected: ItemStamp,
    item: PlanItem,
) -> UpdateResult {
    state.finish_regeneration(target, reservation);

    let applied = match state.document.as_ref() {
        Some(doc) => doc.apply(PlanCommand::ReplaceItem {
            target,
            item,
            expected,
        }),
        None => Err(Error::NoStrategyPlan),
    };

    match applied {
        Ok(next) => {
            if let Err(e) = state.credits.commit(reservation) {
                warn!("Failed to commit credit reservation {}: {}", reservation, e);
            }
            let generation = next.generation();
            state.document = Some(next);
            state.emit(PlannerEvent::StrategyContentUpdate { target, generation });
            state.notify(Notice::success(format!("Regenerated {}", target)));
        }
        Err(e) => {
            if let Err(release_err) = state.credits.release(reservation) {
                warn!("Failed to release reservation {}: {}", reservation, release_err);
            }
            if matches!(e, Error::Conflict { .. }) {
                state.notify(Notice::info(format!(
                    "The plan changed while {} was being regenerated. The result was discarded and no credits were used.",
                    target
                )));
            } else {
                state.notify_error(&e);
            }
        }
    }
    UpdateResult::none()
}

pub fn handle_regeneration_failed(
    state: &mut AppState,
    target: PlanItemRef,
    reservation: ReservationId,
    error: String,
) -> UpdateResult {
    state.finish_regeneration(target, reservation);
    if let Err(e) = state.credits.release(reservation) {
        warn!("Failed to release reservation {}: {}", reservation, e);
    }
    state.notify(Notice::failed(format!(
        "Failed to regenerate {}: {}. No credits were used.",
        target, error
    )));
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Saving
// ─────────────────────────────────────────────────────────

pub fn handle_save_item(state: &mut AppState, target: PlanItemRef) -> UpdateResult {
    let Some(item) = require_item(state, target) else {
        return UpdateResult::none();
    };
    let Some(user_id) = require_user(state, "save to your tabs") else {
        return UpdateResult::none();
    };
    let save_target = SaveTarget::Item(target);
    if state.saving.contains(&save_target) {
        debug!("Save of {} already in flight, ignoring", target);
        return UpdateResult::none();
    }

    let record = SaveRecord::build(&item, &state.config, Utc::now());
    state.saving.insert(save_target);

    UpdateResult::action(UpdateAction::SaveItem {
        user_id,
        target,
        record: Box::new(record),
    })
}

pub fn handle_save_strategy(state: &mut AppState) -> UpdateResult {
    let Some(plan) = state.plan() else {
        state.notify_error(&Error::NoStrategyPlan);
        return UpdateResult::none();
    };
    let record = StrategyRecord::build(&state.config, plan, Utc::now());
    let Some(user_id) = require_user(state, "save strategies") else {
        return UpdateResult::none();
    };
    if state.saving.contains(&SaveTarget::Strategy) {
        debug!("Strategy save already in flight, ignoring");
        return UpdateResult::none();
    }

    state.saving.insert(SaveTarget::Strategy);
    UpdateResult::action(UpdateAction::SaveStrategy {
        user_id,
        record: Box::new(record),
    })
}

pub fn handle_saved(
    state: &mut AppState,
    target: SaveTarget,
    record_id: String,
    title: String,
) -> UpdateResult {
    state.saving.remove(&target);

    let event = match target {
        SaveTarget::Item(PlanItemRef::Pillar(_)) => PlannerEvent::ContentPillarSaved {
            record_id,
            pillar_name: title.clone(),
        },
        other => PlannerEvent::StrategySaved {
            kind: other.saved_kind(),
            record_id,
        },
    };
    state.emit(event);
    state.notify(Notice::success(format!("Saved \"{}\"", title)));
    UpdateResult::none()
}

pub fn handle_save_failed(state: &mut AppState, target: SaveTarget, error: String) -> UpdateResult {
    state.saving.remove(&target);
    let what = match target {
        SaveTarget::Strategy => "strategy".to_string(),
        SaveTarget::Item(item) => item.to_string(),
    };
    state.notify(Notice::failed(format!("Failed to save {}: {}", what, error)));
    UpdateResult::none()
}

pub fn handle_store_locally(state: &mut AppState) -> UpdateResult {
    let Some(plan) = state.plan() else {
        state.notify_error(&Error::NoStrategyPlan);
        return UpdateResult::none();
    };
    UpdateResult::action(UpdateAction::StoreStrategyLocally {
        config: Box::new(state.config.clone()),
        plan: Box::new(plan.clone()),
    })
}

pub fn handle_stored_locally(state: &mut AppState, saved_count: usize) -> UpdateResult {
    state.notify(Notice::success(format!(
        "Strategy saved on this device ({} kept)",
        saved_count
    )));
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Host hand-offs
// ─────────────────────────────────────────────────────────

pub fn handle_send_to_canvas(state: &mut AppState, target: PlanItemRef) -> UpdateResult {
    let Some(item) = require_item(state, target) else {
        return UpdateResult::none();
    };
    state.host.send_to_canvas(&item.to_text(), item.title());
    state.notify(Notice::success(format!("Sent \"{}\" to the canvas", item.title())));
    UpdateResult::none()
}

pub fn handle_send_mind_map(state: &mut AppState) -> UpdateResult {
    let Some(plan) = state.plan() else {
        state.notify_error(&Error::NoStrategyPlan);
        return UpdateResult::none();
    };
    state.host.send_strategy_mind_map(&plan.outline(), plan);
    state.notify(Notice::success("Strategy mind map sent"));
    UpdateResult::none()
}

/// Copy the weekly schedule into the selected calendar week and hand the
/// new items to the host calendar.
pub fn handle_add_schedule_to_calendar(state: &mut AppState) -> UpdateResult {
    let Some(plan) = state.plan() else {
        state.notify_error(&Error::NoStrategyPlan);
        return UpdateResult::none();
    };
    let entries = plan.suggested_weekly_schedule.clone();
    if entries.is_empty() {
        state.notify(Notice::info("This plan has no weekly schedule to add"));
        return UpdateResult::none();
    }

    let added = state.calendar.import_schedule(&entries);
    let items = state.calendar.calendar.items();
    let new_items = &items[items.len().saturating_sub(added)..];
    state.host.add_to_calendar(new_items);

    let week = state.calendar.selected_week_start();
    state.notify(Notice::success(format!(
        "Added {} posts to the week of {}",
        added,
        week.format("%b %-d")
    )));
    UpdateResult::none()
}

pub fn handle_copy(state: &mut AppState, target: PlanItemRef) -> UpdateResult {
    let Some(item) = require_item(state, target) else {
        return UpdateResult::none();
    };
    UpdateResult::action(UpdateAction::CopyToClipboard {
        title: item.title().to_string(),
        text: item.to_text(),
    })
}

pub fn handle_copied(state: &mut AppState, title: String) -> UpdateResult {
    state.notify(Notice::success(format!("Copied \"{}\" to the clipboard", title)));
    UpdateResult::none()
}
