//! Status bar widget
//!
//! Shows what the planner is busy with on the left and the key hints for
//! the current view on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use planner_app::{AppState, CalendarFocus, StrategyFocus, View};

use crate::theme::styles;

/// Status bar widget showing busy state and key hints
pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn state_indicator(&self) -> Span<'static> {
        let state = self.state;
        if state.is_loading {
            return Span::styled("⟳ Generating", styles::status_yellow());
        }
        if !state.regenerating.is_empty() {
            return Span::styled(
                format!("⟳ Regenerating {}", state.regenerating.len()),
                styles::status_yellow(),
            );
        }
        if !state.saving.is_empty() {
            return Span::styled("⟳ Saving", styles::status_yellow());
        }
        if state.exporting {
            return Span::styled("⟳ Exporting", styles::status_yellow());
        }
        if state.error.is_some() {
            return Span::styled("✗ Generation failed", styles::status_red());
        }
        if state.tracker.ticker_running {
            return Span::styled("● Live analytics", styles::status_green());
        }
        Span::styled("● Ready", styles::status_green())
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        let state = self.state;
        if !state.notices.is_empty() {
            return &[("Enter", "dismiss")];
        }
        if state.action_menu.is_some() {
            return &[("↑↓", "choose"), ("Enter", "run"), ("Esc", "close")];
        }
        match state.view {
            View::Strategy => match state.focus {
                StrategyFocus::Form => &[
                    ("Tab", "field"),
                    ("←→", "option"),
                    ("^G", "generate"),
                    ("Esc", "plan"),
                    ("^Q", "quit"),
                ],
                StrategyFocus::Plan => &[
                    ("j/k", "item"),
                    ("Enter", "actions"),
                    ("^E", "pdf"),
                    ("^J", "json"),
                    ("^S", "save"),
                    ("m", "mind map"),
                    ("Tab", "form"),
                ],
            },
            View::Analytics => &[
                ("Enter", "track"),
                ("↑↓", "topic"),
                ("Del", "remove"),
                ("Esc", "clear"),
            ],
            View::Calendar => match state.calendar.focus {
                CalendarFocus::Days => &[
                    ("←→", "day"),
                    ("PgUp/PgDn", "month"),
                    ("Enter", "schedule"),
                    ("^F", "platform"),
                    ("Tab", "posts"),
                ],
                CalendarFocus::Items => &[
                    ("↑↓", "post"),
                    ("^S", "status"),
                    ("Del", "delete"),
                    ("Tab", "ideas"),
                ],
                CalendarFocus::Ideas => &[
                    ("Enter", "add/draft"),
                    ("↑↓", "idea"),
                    ("Del", "delete"),
                    ("Tab", "days"),
                ],
            },
            View::Templates => &[
                ("↑↓", "template"),
                ("Tab", "tier"),
                ("Enter", "load"),
                ("Esc", "clear"),
            ],
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let indicator = self.state_indicator();
        let indicator_width = indicator.content.width() as u16 + 2;

        let mut hint_spans = Vec::new();
        let mut used = 0u16;
        let budget = area.width.saturating_sub(indicator_width + 1);
        for (key, action) in self.hints() {
            let width = (key.width() + action.width() + 3) as u16;
            if used + width > budget {
                break;
            }
            hint_spans.push(Span::styled(*key, styles::keybinding()));
            hint_spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
            used += width;
        }

        Paragraph::new(Line::from(vec![Span::raw(" "), indicator])).render(area, buf);

        let hints_area = Rect {
            x: area.x + area.width.saturating_sub(used),
            width: used.min(area.width),
            ..area
        };
        Paragraph::new(Line::from(hint_spans)).render(hints_area, buf);
    }
}
