//! Header bar: app title, view tabs, plan tier and credit balance

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use planner_app::View;
use planner_core::TemplateTier;

use crate::theme::{palette, styles};

use super::ViewTabs;

const TITLE: &str = "Strategy Planner";

pub struct MainHeader<'a> {
    view: View,
    tier: TemplateTier,
    credits: u32,
    user: Option<&'a str>,
}

impl<'a> MainHeader<'a> {
    pub fn new(view: View, tier: TemplateTier, credits: u32) -> Self {
        Self {
            view,
            tier,
            credits,
            user: None,
        }
    }

    pub fn with_user(mut self, user: Option<&'a str>) -> Self {
        self.user = user;
        self
    }

    fn right_line(&self) -> Line<'static> {
        let account = match self.user {
            Some(user) => Span::styled(user.to_string(), styles::text_secondary()),
            None => Span::styled("signed out", styles::text_muted()),
        };
        let credit_style = if self.credits == 0 {
            styles::status_red()
        } else {
            styles::status_green()
        };
        Line::from(vec![
            account,
            Span::styled(" · ", styles::text_muted()),
            Span::styled(format!("{} plan", self.tier.label()), styles::tier_style(self.tier)),
            Span::styled(" · ", styles::text_muted()),
            Span::styled(format!("{} credits", self.credits), credit_style),
            Span::raw(" "),
        ])
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let row = Rect { height: 1, ..inner };

        let title = Line::from(vec![Span::raw(" "), Span::styled(TITLE, styles::accent_bold())]);
        let title_width = title.width() as u16 + 2;
        Paragraph::new(title).render(row, buf);

        let right = self.right_line();
        let right_width = (right.width() as u16).min(row.width);
        let right_area = Rect {
            x: row.x + row.width - right_width,
            width: right_width,
            ..row
        };

        // Tabs fill the space between title and status when it fits
        let tabs_x = row.x + title_width;
        let tabs_end = right_area.x.saturating_sub(1);
        if tabs_end > tabs_x && tabs_end - tabs_x >= ViewTabs::width() {
            let tabs_area = Rect {
                x: tabs_x,
                width: tabs_end - tabs_x,
                ..row
            };
            ViewTabs::new(self.view).render(tabs_area, buf);
        } else if tabs_end > tabs_x {
            let label = Line::from(Span::styled(self.view.title(), styles::accent()));
            Paragraph::new(label).render(
                Rect {
                    x: tabs_x,
                    width: tabs_end - tabs_x,
                    ..row
                },
                buf,
            );
        }

        Paragraph::new(right).render(right_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_header_shows_title_tabs_and_credits() {
        let mut term = TestTerminal::with_size(120, 3);
        let header = MainHeader::new(View::Strategy, TemplateTier::Premium, 25)
            .with_user(Some("user-1"));
        term.render_widget(header, Rect::new(0, 0, 120, 3));

        assert!(term.buffer_contains("Strategy Planner"));
        assert!(term.buffer_contains("Templates"));
        assert!(term.buffer_contains("Premium plan"));
        assert!(term.buffer_contains("25 credits"));
        assert!(term.buffer_contains("user-1"));
    }

    #[test]
    fn test_narrow_header_shows_current_view_only() {
        let mut term = TestTerminal::with_size(70, 3);
        let header = MainHeader::new(View::Calendar, TemplateTier::Free, 0);
        term.render_widget(header, Rect::new(0, 0, 70, 3));

        assert!(term.buffer_contains("signed out"));
        assert!(term.buffer_contains("0 credits"));
        assert!(term.buffer_contains("Calendar"));
        assert!(!term.buffer_contains("Templates"));
    }
}
