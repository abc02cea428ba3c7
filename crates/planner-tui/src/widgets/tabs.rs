//! View tabs shown inside the header

use planner_app::View;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Tabs, Widget},
};

use crate::theme::styles;

pub struct ViewTabs {
    current: View,
}

impl ViewTabs {
    pub fn new(current: View) -> Self {
        Self { current }
    }

    fn titles() -> Vec<Line<'static>> {
        View::ALL
            .iter()
            .enumerate()
            .map(|(i, view)| {
                Line::from(vec![
                    Span::styled(format!("F{} ", i + 1), styles::text_muted()),
                    Span::raw(view.title()),
                ])
            })
            .collect()
    }

    /// Columns the tabs occupy
    pub fn width() -> u16 {
        let titles: u16 = Self::titles().iter().map(|l| l.width() as u16 + 2).sum();
        titles + View::ALL.len() as u16 - 1
    }
}

impl Widget for ViewTabs {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let selected = View::ALL.iter().position(|v| *v == self.current);
        Tabs::new(Self::titles())
            .select(selected)
            .highlight_style(styles::focused_selected())
            .divider("│")
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_all_views_listed() {
        let mut term = TestTerminal::with_size(80, 1);
        term.render_widget(ViewTabs::new(View::Calendar), Rect::new(0, 0, 80, 1));

        for view in View::ALL {
            assert!(term.buffer_contains(view.title()));
        }
        assert!(term.buffer_contains("F3 Calendar"));
    }

    #[test]
    fn test_selected_tab_is_highlighted() {
        let mut term = TestTerminal::with_size(80, 1);
        term.render_widget(ViewTabs::new(View::Analytics), Rect::new(0, 0, 80, 1));

        let buffer = term.buffer();
        let highlighted: String = (0..80)
            .filter_map(|x| buffer.cell((x, 0)))
            .filter(|c| c.bg == crate::theme::palette::ACCENT)
            .map(|c| c.symbol().to_string())
            .collect();
        assert!(highlighted.contains("Analytics"));
        assert!(!highlighted.contains("Strategy"));
    }
}
