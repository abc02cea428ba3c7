//! Modal notice dialog. Shows the oldest queued notice until dismissed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use planner_app::{Notice, NoticeQueue};

use crate::theme::{palette, styles};

use super::modal_overlay::{centered_rect, dim_background, render_shadow};

const NOTICE_WIDTH: u16 = 60;

pub struct NoticeModal<'a> {
    notices: &'a NoticeQueue,
}

impl<'a> NoticeModal<'a> {
    pub fn new(notices: &'a NoticeQueue) -> Self {
        Self { notices }
    }

    fn height_for(notice: &Notice, text_width: u16) -> u16 {
        let width = text_width.max(1) as usize;
        let rows: usize = notice
            .message
            .lines()
            .map(|line| line.width().div_ceil(width).max(1))
            .sum();
        // borders, spacer, footer
        rows as u16 + 4
    }
}

impl Widget for NoticeModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(notice) = self.notices.current() else {
            return;
        };

        dim_background(buf, area);

        let width = NOTICE_WIDTH.min(area.width);
        let height = Self::height_for(notice, width.saturating_sub(4));
        let rect = centered_rect(width, height, area);
        Clear.render(rect, buf);
        render_shadow(buf, rect);

        let style = styles::notice_style(notice.category);
        let block = Block::default()
            .title(Span::styled(format!(" {} ", notice.category.title()), style))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(Style::default().bg(palette::POPUP_BG));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let inner = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };

        let more = self.notices.len().saturating_sub(1);
        let footer = if more > 0 {
            format!("Enter to dismiss · {} more", more)
        } else {
            "Enter to dismiss".to_string()
        };

        let mut lines: Vec<Line> = notice
            .message
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), styles::text_primary())))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(footer, styles::text_muted())));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_renders_current_notice_with_count() {
        let mut queue = NoticeQueue::new();
        queue.push(Notice::failed("Export failed: disk full"));
        queue.push(Notice::success("Saved"));

        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(NoticeModal::new(&queue), area);

        assert!(term.buffer_contains("Something went wrong"));
        assert!(term.buffer_contains("Export failed: disk full"));
        assert!(term.buffer_contains("1 more"));
        assert!(!term.buffer_contains("Saved"));
    }

    #[test]
    fn test_empty_queue_renders_nothing() {
        let queue = NoticeQueue::new();
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(NoticeModal::new(&queue), area);

        assert!(!term.buffer_contains("Enter to dismiss"));
    }

    #[test]
    fn test_long_message_wraps_inside_modal() {
        let mut queue = NoticeQueue::new();
        queue.push(Notice::info("word ".repeat(40)));

        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(NoticeModal::new(&queue), area);

        assert!(term.buffer_contains("Enter to dismiss"));
    }
}
