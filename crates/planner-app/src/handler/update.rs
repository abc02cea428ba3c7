//! Main update function - handles state transitions (TEA pattern)
//!
//! Handler implementations live in the sibling modules:
//! - `form`: strategy form edits and generation
//! - `plan`: plan navigation, menus, regeneration, saves and host hand-offs
//! - `export`: export gate and completion
//! - `analytics`, `calendar`, `templates`: the other three views

use crate::message::Message;
use crate::notice::Notice;
use crate::state::AppState;

use super::{analytics, calendar, export, form, keys::handle_key, plan, templates, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::SwitchView(view) => {
            state.view = view;
            state.action_menu = None;
            UpdateResult::none()
        }

        Message::NextView => {
            state.view = state.view.next();
            state.action_menu = None;
            UpdateResult::none()
        }

        Message::DismissNotice => {
            state.notices.dismiss();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Strategy form
        // ─────────────────────────────────────────────────────────
        Message::SetStrategyConfig(config) => form::handle_set_config(state, *config),
        Message::FormFocusNext => form::handle_focus(state, true),
        Message::FormFocusPrevious => form::handle_focus(state, false),
        Message::FormOptionNext => form::handle_option(state, true),
        Message::FormOptionPrevious => form::handle_option(state, false),
        Message::FormToggle => form::handle_toggle(state),
        Message::FormInput(c) => form::handle_input(state, c),
        Message::FormBackspace => form::handle_backspace(state),
        Message::FormClearField => form::handle_clear_field(state),
        Message::FocusPlan => plan::handle_focus_plan(state),
        Message::FocusForm => plan::handle_focus_form(state),

        // ─────────────────────────────────────────────────────────
        // Generation
        // ─────────────────────────────────────────────────────────
        Message::GenerateStrategy => form::handle_generate(state),
        Message::StrategyGenerated { plan } => form::handle_generated(state, *plan),
        Message::StrategyGenerationFailed { error } => {
            form::handle_generation_failed(state, error)
        }
        Message::SetStrategyPlan(new_plan) => plan::handle_set_plan(state, *new_plan),

        // ─────────────────────────────────────────────────────────
        // Plan view and item menus
        // ─────────────────────────────────────────────────────────
        Message::PlanSelectNext => plan::handle_select(state, true),
        Message::PlanSelectPrevious => plan::handle_select(state, false),
        Message::PlanSectionNext => plan::handle_section_jump(state, true),
        Message::PlanSectionPrevious => plan::handle_section_jump(state, false),
        Message::OpenActionMenu { target } => plan::handle_open_menu(state, target),
        Message::CloseActionMenu => {
            state.action_menu = None;
            UpdateResult::none()
        }
        Message::MenuSelectNext => {
            if let Some(menu) = state.action_menu.as_mut() {
                menu.select_next();
            }
            UpdateResult::none()
        }
        Message::MenuSelectPrevious => {
            if let Some(menu) = state.action_menu.as_mut() {
                menu.select_previous();
            }
            UpdateResult::none()
        }
        Message::MenuActivate => plan::handle_menu_activate(state),
        Message::ItemAction { target, action } => plan::handle_item_action(state, target, action),

        // ─────────────────────────────────────────────────────────
        // Regeneration
        // ─────────────────────────────────────────────────────────
        Message::RegenerateItem { target } => plan::handle_regenerate(state, target),
        Message::ItemRegenerated {
            target,
            reservation,
            expected,
            item,
        } => plan::handle_regenerated(state, target, reservation, expected, *item),
        Message::ItemRegenerationFailed {
            target,
            reservation,
            error,
        } => plan::handle_regeneration_failed(state, target, reservation, error),

        // ─────────────────────────────────────────────────────────
        // Saving and host hand-offs
        // ─────────────────────────────────────────────────────────
        Message::SaveItem { target } => plan::handle_save_item(state, target),
        Message::SaveStrategy => plan::handle_save_strategy(state),
        Message::Saved {
            target,
            record_id,
            title,
        } => plan::handle_saved(state, target, record_id, title),
        Message::SaveFailed { target, error } => plan::handle_save_failed(state, target, error),
        Message::StoreStrategyLocally => plan::handle_store_locally(state),
        Message::StrategyStoredLocally { saved_count } => {
            plan::handle_stored_locally(state, saved_count)
        }
        Message::SendToCanvas { target } => plan::handle_send_to_canvas(state, target),
        Message::SendMindMap => plan::handle_send_mind_map(state),
        Message::AddScheduleToCalendar => plan::handle_add_schedule_to_calendar(state),
        Message::CopyItem { target } => plan::handle_copy(state, target),
        Message::Copied { title } => plan::handle_copied(state, title),

        // ─────────────────────────────────────────────────────────
        // Export
        // ─────────────────────────────────────────────────────────
        Message::Export(format) => export::handle_export(state, format),
        Message::ExportCompleted {
            format,
            path,
            export_count,
        } => export::handle_export_completed(state, format, path, export_count),
        Message::ExportFailed { format, error } => {
            export::handle_export_failed(state, format, error)
        }

        Message::OperationFailed { operation, error } => {
            state.notify(Notice::failed(format!("{} failed: {}", operation, error)));
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Analytics
        // ─────────────────────────────────────────────────────────
        Message::TopicInput(c) => {
            state.tracker.input.push(c);
            UpdateResult::none()
        }
        Message::TopicBackspace => {
            state.tracker.input.pop();
            UpdateResult::none()
        }
        Message::TopicClearInput => {
            state.tracker.input.clear();
            UpdateResult::none()
        }
        Message::TrackTopic => analytics::handle_track_input(state),
        Message::TrackNamedTopic(name) => analytics::handle_track(state, &name),
        Message::RemoveTopic { id } => analytics::handle_remove(state, id),
        Message::RemoveSelectedTopic => analytics::handle_remove_selected(state),
        Message::TopicSelectNext => {
            state.tracker.select_next();
            UpdateResult::none()
        }
        Message::TopicSelectPrevious => {
            state.tracker.select_previous();
            UpdateResult::none()
        }
        Message::AnalyticsTick => analytics::handle_tick(state),

        // ─────────────────────────────────────────────────────────
        // Calendar
        // ─────────────────────────────────────────────────────────
        Message::CalendarMoveDays(days) => {
            state.calendar.move_days(days);
            UpdateResult::none()
        }
        Message::CalendarMonthNext => {
            state.calendar.move_months(true);
            UpdateResult::none()
        }
        Message::CalendarMonthPrevious => {
            state.calendar.move_months(false);
            UpdateResult::none()
        }
        Message::CalendarFocusNext => {
            state.calendar.focus = state.calendar.focus.next();
            UpdateResult::none()
        }
        Message::CalendarCursorNext => {
            state.calendar.move_cursor(true);
            UpdateResult::none()
        }
        Message::CalendarCursorPrevious => {
            state.calendar.move_cursor(false);
            UpdateResult::none()
        }
        Message::CalendarCycleFilter => {
            state.calendar.cycle_filter();
            UpdateResult::none()
        }
        Message::CalendarInput(c) => {
            state.calendar.input.push(c);
            UpdateResult::none()
        }
        Message::CalendarBackspace => {
            state.calendar.input.pop();
            UpdateResult::none()
        }
        Message::CalendarSubmit => calendar::handle_submit(state),
        Message::CalendarCycleStatus => calendar::handle_cycle_status(state),
        Message::CalendarDelete => calendar::handle_delete(state),

        // ─────────────────────────────────────────────────────────
        // Templates
        // ─────────────────────────────────────────────────────────
        Message::GallerySelectNext => {
            state.gallery.select_next();
            UpdateResult::none()
        }
        Message::GallerySelectPrevious => {
            state.gallery.select_previous();
            UpdateResult::none()
        }
        Message::GalleryCycleTier => {
            state.gallery.cycle_tier();
            UpdateResult::none()
        }
        Message::GalleryInput(c) => {
            state.gallery.push_query(c);
            UpdateResult::none()
        }
        Message::GalleryBackspace => {
            state.gallery.pop_query();
            UpdateResult::none()
        }
        Message::GalleryClearSearch => {
            state.gallery.clear_query();
            UpdateResult::none()
        }
        Message::LoadSelectedTemplate => templates::handle_load_selected(state),
        Message::LoadTemplate { id } => templates::handle_load_template(state, &id),
    }
}
