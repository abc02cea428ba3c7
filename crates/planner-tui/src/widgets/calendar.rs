//! Content calendar view: month grid, posts on the selected day, the
//! idea backlog, and the title input.

use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use planner_app::{CalendarFocus, CalendarViewState};

use crate::layout::split_panes;
use crate::theme::styles;

use super::text::truncate;

const WEEKDAYS: &str = " Mo  Tu  We  Th  Fr  Sa  Su";

pub struct CalendarView<'a> {
    calendar: &'a CalendarViewState,
    today: NaiveDate,
}

impl<'a> CalendarView<'a> {
    pub fn new(calendar: &'a CalendarViewState, today: NaiveDate) -> Self {
        Self { calendar, today }
    }

    fn render_month(&self, area: Rect, buf: &mut Buffer) {
        let cal = self.calendar;
        let filter = cal
            .platform_filter
            .map(|p| format!(" · {}", p.label()))
            .unwrap_or_default();
        let title = format!(" {}{} ", cal.month.format("%B %Y"), filter);
        let block = styles::glass_block(cal.focus == CalendarFocus::Days).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(WEEKDAYS, styles::text_muted()))];
        for week in cal.month_weeks() {
            let mut spans = Vec::with_capacity(7);
            for day in week {
                let Some(date) = day else {
                    spans.push(Span::raw("    "));
                    continue;
                };
                let count = cal.calendar.items_on(date, cal.platform_filter).len();
                let mark = if count > 0 { "•" } else { " " };
                let mut style = if date == cal.selected_date {
                    if cal.focus == CalendarFocus::Days {
                        styles::focused_selected()
                    } else {
                        styles::unfocused_selected()
                    }
                } else if count > 0 {
                    styles::accent()
                } else {
                    styles::text_primary()
                };
                if date == self.today {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                spans.push(Span::styled(format!(" {:>2}", date.day()), style));
                spans.push(Span::styled(mark, styles::accent()));
            }
            lines.push(Line::from(spans));
        }

        let month_total = cal
            .calendar
            .count_in_month(cal.month.year(), cal.month.month());
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{} this month · {} in the selected week",
                plural(month_total, "post"),
                cal.week_items().len()
            ),
            styles::text_secondary(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_day(&self, area: Rect, buf: &mut Buffer) {
        let cal = self.calendar;
        let title = format!(" {} ", cal.selected_date.format("%a %-d %b"));
        let block = styles::glass_block(cal.focus == CalendarFocus::Items).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let items = cal.day_items();
        if items.is_empty() {
            Paragraph::new(Span::styled("Nothing scheduled.", styles::text_muted())).render(inner, buf);
            return;
        }

        let width = inner.width as usize;
        let lines: Vec<Line> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = cal.focus == CalendarFocus::Items && i == cal.item_cursor;
                let title_style = if selected {
                    styles::focused_selected()
                } else {
                    styles::text_primary()
                };
                let prefix = format!("{} {:<10} ", item.time.format("%H:%M"), item.platform.label());
                let status = format!(" {}", item.status.label());
                let title_width = width.saturating_sub(prefix.chars().count() + status.chars().count());
                Line::from(vec![
                    Span::styled(prefix, styles::text_secondary()),
                    Span::styled(truncate(&item.title, title_width), title_style),
                    Span::styled(status, styles::content_status_style(item.status)),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_ideas(&self, area: Rect, buf: &mut Buffer) {
        let cal = self.calendar;
        let ideas = cal.calendar.ideas();
        let title = format!(" Ideas ({}) ", ideas.len());
        let block = styles::glass_block(cal.focus == CalendarFocus::Ideas).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let lines: Vec<Line> = ideas
            .iter()
            .enumerate()
            .map(|(i, idea)| {
                let selected = cal.focus == CalendarFocus::Ideas && i == cal.idea_cursor;
                let style = if selected {
                    styles::focused_selected()
                } else {
                    styles::text_primary()
                };
                Line::from(vec![
                    Span::styled("◦ ", styles::accent()),
                    Span::styled(truncate(&idea.title, width.saturating_sub(2)), style),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let cal = self.calendar;
        let (title, placeholder) = match cal.focus {
            CalendarFocus::Ideas => (" New idea ", "Idea title, Enter to add · empty Enter drafts the selected idea"),
            _ => (" Schedule post ", "Title @ time, e.g. Launch teaser @ 2pm"),
        };
        let block = styles::glass_block(false).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if cal.input.is_empty() {
            Line::from(Span::styled(placeholder, styles::text_muted()))
        } else {
            Line::from(vec![
                Span::styled(cal.input.clone(), styles::text_primary()),
                Span::styled("▏", styles::accent()),
            ])
        };
        Paragraph::new(line).render(inner, buf);
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

impl Widget for CalendarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (left, right) = split_panes(area, 45);

        let [month_area, input_area] =
            Layout::vertical([Constraint::Min(6), Constraint::Length(3)]).areas(left);
        self.render_month(month_area, buf);
        self.render_input(input_area, buf);

        let [day_area, ideas_area] =
            Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(right);
        self.render_day(day_area, buf);
        self.render_ideas(ideas_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 11).unwrap()
    }

    #[test]
    fn test_month_grid_and_empty_day() {
        let cal = CalendarViewState::new(today());
        let mut term = TestTerminal::with_size(120, 30);
        let area = term.area();
        term.render_widget(CalendarView::new(&cal, today()), area);

        assert!(term.buffer_contains("March 2026"));
        assert!(term.buffer_contains("Mo  Tu  We"));
        assert!(term.buffer_contains("Nothing scheduled."));
        assert!(term.buffer_contains("0 posts this month"));
        assert!(term.buffer_contains("Ideas (0)"));
    }

    #[test]
    fn test_scheduled_item_and_idea_render() {
        let mut cal = CalendarViewState::new(today());
        cal.input = "Launch teaser @ 2pm".to_string();
        cal.schedule_from_input();
        cal.input = "Behind the scenes".to_string();
        cal.add_idea_from_input();

        let mut term = TestTerminal::with_size(120, 30);
        let area = term.area();
        term.render_widget(CalendarView::new(&cal, today()), area);

        assert!(term.buffer_contains("14:00"));
        assert!(term.buffer_contains("Launch teaser"));
        assert!(term.buffer_contains("1 post this month"));
        assert!(term.buffer_contains("Behind the scenes"));
        assert!(term.buffer_contains("Ideas (1)"));
    }
}
