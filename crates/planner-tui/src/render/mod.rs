//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use chrono::Local;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use planner_app::{AppState, StrategyFocus, View};

use super::{layout, widgets};
use crate::theme::palette;

/// Share of the strategy view given to the form
const FORM_PERCENT: u16 = 40;

/// Render the complete UI (View function in TEA)
///
/// Pure rendering: reads the state and never modifies it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    let user = state.user_id();
    frame.render_widget(
        widgets::MainHeader::new(state.view, state.access.tier(), state.credits.available())
            .with_user(user.as_deref()),
        areas.header,
    );

    match state.view {
        View::Strategy => render_strategy(frame, areas.body, state),
        View::Analytics => frame.render_widget(
            widgets::AnalyticsView::new(
                &state.tracker,
                state.settings.analytics.refresh_interval_secs,
            ),
            areas.body,
        ),
        View::Calendar => frame.render_widget(
            widgets::CalendarView::new(&state.calendar, Local::now().date_naive()),
            areas.body,
        ),
        View::Templates => frame.render_widget(
            widgets::TemplateGallery::new(&state.gallery, &state.access),
            areas.body,
        ),
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    render_action_menu(frame, state);

    if !state.notices.is_empty() {
        frame.render_widget(widgets::NoticeModal::new(&state.notices), area);
    }
}

fn render_strategy(frame: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let (form_area, plan_area) = layout::split_panes(area, FORM_PERCENT);

    frame.render_widget(
        widgets::StrategyForm::new(&state.config, state.form)
            .focused(state.focus == StrategyFocus::Form)
            .loading(state.is_loading),
        form_area,
    );

    frame.render_widget(
        widgets::PlanView::new(state.plan())
            .selected(state.selected_item())
            .in_flight(&state.regenerating, &state.saving)
            .focused(state.focus == StrategyFocus::Plan)
            .error(state.error.as_deref()),
        plan_area,
    );
}

fn render_action_menu(frame: &mut Frame, state: &AppState) {
    let Some(menu) = state.action_menu.as_ref() else {
        return;
    };
    let title = state
        .plan()
        .and_then(|plan| plan.item(menu.target))
        .map(|item| item.title().to_string())
        .unwrap_or_default();

    frame.render_widget(
        widgets::ActionMenu::new(menu, &title)
            .regenerate_cost(state.settings.credits.regenerate_cost)
            .busy(state.is_regenerating(menu.target)),
        frame.area(),
    );
}
