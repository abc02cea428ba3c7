//! Key event handlers for the four views

use planner_core::ExportFormat;

use crate::calendar_view::CalendarFocus;
use crate::form::FieldKind;
use crate::input_key::InputKey;
use crate::menu::ItemAction;
use crate::message::Message;
use crate::state::{AppState, StrategyFocus, View};

/// Convert key events to messages based on the current view
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // A shown notice is modal
    if !state.notices.is_empty() {
        return handle_key_notice(key);
    }

    if let Some(msg) = handle_key_global(&key) {
        return Some(msg);
    }

    match state.view {
        View::Strategy => match state.focus {
            StrategyFocus::Form => handle_key_form(state, key),
            StrategyFocus::Plan if state.action_menu.is_some() => handle_key_action_menu(state, key),
            StrategyFocus::Plan => handle_key_plan(state, key),
        },
        View::Analytics => handle_key_analytics(key),
        View::Calendar => handle_key_calendar(state, key),
        View::Templates => handle_key_templates(key),
    }
}

fn handle_key_notice(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc | InputKey::Char(' ') => Some(Message::DismissNotice),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_global(key: &InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') | InputKey::CharCtrl('q') => Some(Message::Quit),
        InputKey::CharCtrl('t') => Some(Message::NextView),
        InputKey::F(n @ 1..=4) => View::ALL
            .get(usize::from(*n) - 1)
            .map(|view| Message::SwitchView(*view)),
        _ => None,
    }
}

/// Shortcuts available from either half of the strategy view
fn handle_key_strategy_shortcuts(key: &InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('g') => Some(Message::GenerateStrategy),
        InputKey::CharCtrl('e') => Some(Message::Export(ExportFormat::Pdf)),
        InputKey::CharCtrl('j') => Some(Message::Export(ExportFormat::Json)),
        InputKey::CharCtrl('s') => Some(Message::SaveStrategy),
        InputKey::CharCtrl('l') => Some(Message::StoreStrategyLocally),
        _ => None,
    }
}

fn handle_key_form(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(msg) = handle_key_strategy_shortcuts(&key) {
        return Some(msg);
    }

    let is_text = state.form.focus.kind() == FieldKind::Text;
    match key {
        InputKey::Tab | InputKey::Down => Some(Message::FormFocusNext),
        InputKey::BackTab | InputKey::Up => Some(Message::FormFocusPrevious),
        InputKey::Right if !is_text => Some(Message::FormOptionNext),
        InputKey::Left if !is_text => Some(Message::FormOptionPrevious),
        InputKey::Enter if is_text => Some(Message::GenerateStrategy),
        InputKey::Enter | InputKey::Char(' ') if !is_text => Some(Message::FormToggle),
        InputKey::Backspace if is_text => Some(Message::FormBackspace),
        InputKey::Delete if is_text => Some(Message::FormClearField),
        InputKey::Esc => Some(Message::FocusPlan),
        other if is_text => other.typed_char().map(Message::FormInput),
        _ => None,
    }
}

fn handle_key_plan(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(msg) = handle_key_strategy_shortcuts(&key) {
        return Some(msg);
    }

    match key {
        InputKey::Down | InputKey::Char('j') => Some(Message::PlanSelectNext),
        InputKey::Up | InputKey::Char('k') => Some(Message::PlanSelectPrevious),
        InputKey::PageDown => Some(Message::PlanSectionNext),
        InputKey::PageUp => Some(Message::PlanSectionPrevious),
        InputKey::Esc | InputKey::Tab | InputKey::Char('i') => Some(Message::FocusForm),
        InputKey::Char('m') => Some(Message::SendMindMap),
        InputKey::Char('a') => Some(Message::AddScheduleToCalendar),
        InputKey::Enter => state
            .selected_item()
            .map(|target| Message::OpenActionMenu { target }),
        InputKey::Char(c) => {
            let action = ItemAction::from_shortcut(c)?;
            let target = state.selected_item()?;
            Some(Message::ItemAction { target, action })
        }
        _ => None,
    }
}

fn handle_key_action_menu(state: &AppState, key: InputKey) -> Option<Message> {
    let target = state.action_menu.as_ref()?.target;
    match key {
        InputKey::Down => Some(Message::MenuSelectNext),
        InputKey::Up => Some(Message::MenuSelectPrevious),
        InputKey::Enter => Some(Message::MenuActivate),
        InputKey::Char(c) => match ItemAction::from_shortcut(c) {
            Some(action) => Some(Message::ItemAction { target, action }),
            None => Some(Message::CloseActionMenu),
        },
        // Any other navigation closes the menu
        _ => Some(Message::CloseActionMenu),
    }
}

fn handle_key_analytics(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::TrackTopic),
        InputKey::Backspace => Some(Message::TopicBackspace),
        InputKey::Esc => Some(Message::TopicClearInput),
        InputKey::Down => Some(Message::TopicSelectNext),
        InputKey::Up => Some(Message::TopicSelectPrevious),
        InputKey::Delete => Some(Message::RemoveSelectedTopic),
        other => other.typed_char().map(Message::TopicInput),
    }
}

fn handle_key_calendar(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab => Some(Message::CalendarFocusNext),
        InputKey::Left if state.calendar.focus == CalendarFocus::Days => {
            Some(Message::CalendarMoveDays(-1))
        }
        InputKey::Right if state.calendar.focus == CalendarFocus::Days => {
            Some(Message::CalendarMoveDays(1))
        }
        InputKey::Down => Some(Message::CalendarCursorNext),
        InputKey::Up => Some(Message::CalendarCursorPrevious),
        InputKey::PageDown => Some(Message::CalendarMonthNext),
        InputKey::PageUp => Some(Message::CalendarMonthPrevious),
        InputKey::Enter => Some(Message::CalendarSubmit),
        InputKey::Backspace => Some(Message::CalendarBackspace),
        InputKey::Delete => Some(Message::CalendarDelete),
        InputKey::CharCtrl('f') => Some(Message::CalendarCycleFilter),
        InputKey::CharCtrl('s') => Some(Message::CalendarCycleStatus),
        InputKey::CharCtrl('w') => Some(Message::AddScheduleToCalendar),
        other => other.typed_char().map(Message::CalendarInput),
    }
}

fn handle_key_templates(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Down => Some(Message::GallerySelectNext),
        InputKey::Up => Some(Message::GallerySelectPrevious),
        InputKey::Tab => Some(Message::GalleryCycleTier),
        InputKey::Enter => Some(Message::LoadSelectedTemplate),
        InputKey::Backspace => Some(Message::GalleryBackspace),
        InputKey::Esc => Some(Message::GalleryClearSearch),
        other => other.typed_char().map(Message::GalleryInput),
    }
}
