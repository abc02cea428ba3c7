use planner_app::test_utils::test_plan;
use planner_app::{ActionMenuState, AppState, Notice, StrategyFocus, View};
use planner_core::{PlanDocument, PlanItemRef};

use super::view;
use crate::test_utils::TestTerminal;

fn draw(state: &AppState) -> TestTerminal {
    let mut term = TestTerminal::with_size(120, 40);
    term.draw_with(|frame| view(frame, state));
    term
}

#[test]
fn test_initial_strategy_view() {
    let state = AppState::new();
    let term = draw(&state);

    assert!(term.buffer_contains("Strategy Planner"));
    assert!(term.buffer_contains("Generate strategy"));
    assert!(term.buffer_contains("No strategy yet"));
    assert!(term.buffer_contains("Ready"));
}

#[test]
fn test_each_view_renders_its_body() {
    let mut state = AppState::new();

    state.view = View::Analytics;
    assert!(draw(&state).buffer_contains("Tracked topics"));

    state.view = View::Calendar;
    assert!(draw(&state).buffer_contains("Ideas (0)"));

    state.view = View::Templates;
    assert!(draw(&state).buffer_contains("Small Business Starter"));
}

#[test]
fn test_action_menu_overlays_plan() {
    let mut state = AppState::new();
    state.document = Some(PlanDocument::new(test_plan()));
    state.focus = StrategyFocus::Plan;
    state.action_menu = Some(ActionMenuState::new(PlanItemRef::Goal(0)));

    let term = draw(&state);

    assert!(term.buffer_contains("Regenerate (1 credit)"));
    assert!(term.buffer_contains("Copy to clipboard"));
    assert!(term.buffer_contains("Enter"));
}

#[test]
fn test_notice_modal_drawn_on_top() {
    let mut state = AppState::new();
    state.notices.push(Notice::success("Strategy saved"));

    let term = draw(&state);

    assert!(term.buffer_contains("Strategy saved"));
    assert!(term.buffer_contains("Enter to dismiss"));
}
