//! Content calendar handlers

use crate::calendar_view::CalendarFocus;
use crate::notice::Notice;
use crate::state::AppState;

use super::UpdateResult;

/// Enter: with typed text, schedule it (or add it as an idea when the idea
/// list has focus). Without text, promote the selected idea.
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    let calendar = &mut state.calendar;
    let has_input = !calendar.input.trim().is_empty();

    match (calendar.focus, has_input) {
        (CalendarFocus::Ideas, true) => {
            calendar.add_idea_from_input();
        }
        (CalendarFocus::Ideas, false) => {
            if calendar.promote_selected_idea().is_some() {
                let day = calendar.selected_date.format("%b %-d").to_string();
                state.notify(Notice::success(format!("Idea scheduled as a draft on {}", day)));
            }
        }
        (_, true) => {
            calendar.schedule_from_input();
        }
        (_, false) => {}
    }
    UpdateResult::none()
}

pub fn handle_cycle_status(state: &mut AppState) -> UpdateResult {
    state.calendar.cycle_selected_status();
    UpdateResult::none()
}

/// Delete the selected idea or scheduled item, depending on focus.
pub fn handle_delete(state: &mut AppState) -> UpdateResult {
    match state.calendar.focus {
        CalendarFocus::Ideas => {
            state.calendar.delete_selected_idea();
        }
        _ => {
            state.calendar.delete_selected_item();
        }
    }
    UpdateResult::none()
}
