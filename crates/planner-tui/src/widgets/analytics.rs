//! Analytics view: topic input, tracked topics, rollups, reach history
//! of the selected topic, and generated insights.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Sparkline, Widget, Wrap},
};

use planner_app::TrackerState;
use planner_core::{InsightKind, TrackedTopic};

use crate::layout::split_panes;
use crate::theme::{palette, styles};

use super::text::{compact_number, truncate};

pub struct AnalyticsView<'a> {
    tracker: &'a TrackerState,
    refresh_secs: u64,
}

impl<'a> AnalyticsView<'a> {
    pub fn new(tracker: &'a TrackerState, refresh_secs: u64) -> Self {
        Self {
            tracker,
            refresh_secs,
        }
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(" Track a topic ");
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.tracker.input.is_empty() {
            Line::from(Span::styled("Type a topic and press Enter", styles::text_muted()))
        } else {
            Line::from(vec![
                Span::styled(self.tracker.input.clone(), styles::text_primary()),
                Span::styled("▏", styles::accent()),
            ])
        };
        Paragraph::new(line).render(inner, buf);
    }

    fn topic_line(&self, index: usize, topic: &TrackedTopic, width: usize) -> Line<'static> {
        let is_selected = index == self.tracker.selected;
        let name_style = if is_selected {
            styles::focused_selected()
        } else {
            styles::text_primary()
        };
        let sentiment_style = match topic.sentiment_label() {
            "positive" => styles::status_green(),
            "negative" => styles::status_red(),
            _ => styles::text_secondary(),
        };
        let stats = format!(
            " {:<9} reach {:>6}  trend {:>3}  ",
            topic.category.label(),
            compact_number(topic.metrics.reach),
            topic.metrics.trend_score
        );
        let name_width = width.saturating_sub(stats.chars().count() + 10).max(8);
        Line::from(vec![
            Span::styled(format!("{:<w$}", truncate(&topic.name, name_width), w = name_width), name_style),
            Span::styled(stats, styles::text_secondary()),
            Span::styled(topic.sentiment_label(), sentiment_style),
        ])
    }

    fn render_topics(&self, area: Rect, buf: &mut Buffer) {
        let ticker = if self.tracker.ticker_running {
            format!(" Tracked topics · refresh every {}s ", self.refresh_secs)
        } else {
            " Tracked topics ".to_string()
        };
        let block = styles::glass_block(false).title(ticker);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.tracker.is_empty() {
            Paragraph::new(Span::styled(
                "No topics tracked yet.",
                styles::text_muted(),
            ))
            .render(inner, buf);
            return;
        }

        let width = inner.width as usize;
        let lines: Vec<Line> = self
            .tracker
            .topics
            .iter()
            .enumerate()
            .map(|(i, topic)| self.topic_line(i, topic, width))
            .collect();

        let height = inner.height as usize;
        let offset = self.tracker.selected.saturating_sub(height.saturating_sub(1));
        Paragraph::new(lines)
            .scroll((offset as u16, 0))
            .render(inner, buf);
    }

    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Overview ");
        let inner = block.inner(area);
        block.render(area, buf);

        let summary = &self.tracker.summary;
        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<22}", label), styles::text_secondary()),
                Span::styled(value, styles::text_primary()),
            ])
        };
        let mut lines = vec![
            row("Topics", summary.topic_count.to_string()),
            row("Total reach", compact_number(summary.total_reach)),
            row("Total mentions", compact_number(summary.total_mentions)),
            row("Average trend score", format!("{:.1}", summary.average_trend_score)),
            row("Weighted engagement", format!("{:.2}%", summary.weighted_engagement)),
            row("Sentiment impact", format!("{:+.2}", summary.sentiment_impact)),
            row("Category diversity", format!("{:.0}%", summary.category_diversity * 100.0)),
        ];
        if let Some(updated) = summary.updated_at {
            lines.push(row("Updated", updated.format("%H:%M:%S UTC").to_string()));
        }
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let Some(topic) = self.tracker.selected_topic() else {
            styles::glass_block(false).title(" Reach history ").render(area, buf);
            return;
        };

        let title = format!(" {} · {} days ", truncate(&topic.name, 24), topic.historical_data.len());
        let block = styles::glass_block(false).title(title);
        let reach: Vec<u64> = topic.historical_data.iter().map(|p| p.reach).collect();
        Sparkline::default()
            .block(block)
            .data(reach)
            .style(styles::accent())
            .render(area, buf);
    }

    fn render_insights(&self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Insights ");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .tracker
            .insights
            .iter()
            .map(|insight| {
                let (mark, style) = match insight.kind {
                    InsightKind::Trend => ("↗", styles::accent()),
                    InsightKind::Opportunity => ("★", styles::status_green()),
                    InsightKind::Warning => ("!", styles::status_yellow()),
                };
                Line::from(vec![
                    Span::styled(format!("{} ", mark), style),
                    Span::styled(insight.message.clone(), styles::text_primary()),
                ])
            })
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(ratatui::style::Style::default().bg(palette::CARD_BG))
            .render(inner, buf);
    }
}

impl Widget for AnalyticsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (left, right) = split_panes(area, 55);

        let [input_area, topics_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(left);
        self.render_input(input_area, buf);
        self.render_topics(topics_area, buf);

        let [summary_area, history_area, insights_area] = Layout::vertical([
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Min(3),
        ])
        .areas(right);
        self.render_summary(summary_area, buf);
        self.render_history(history_area, buf);
        self.render_insights(insights_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tracker_with(names: &[&str]) -> TrackerState {
        let mut tracker = TrackerState::new();
        let mut rng = StdRng::seed_from_u64(7);
        for name in names {
            tracker.track(name, Utc::now(), 14, &mut rng);
        }
        tracker
    }

    #[test]
    fn test_empty_tracker_prompts_for_input() {
        let tracker = TrackerState::new();
        let mut term = TestTerminal::with_size(120, 30);
        let area = term.area();
        term.render_widget(AnalyticsView::new(&tracker, 30), area);

        assert!(term.buffer_contains("Type a topic and press Enter"));
        assert!(term.buffer_contains("No topics tracked yet."));
        assert!(term.buffer_contains("Insights"));
    }

    #[test]
    fn test_topics_and_rollups_render() {
        let mut tracker = tracker_with(&["AI tools", "Sourdough"]);
        tracker.ticker_running = true;
        let mut term = TestTerminal::with_size(120, 30);
        let area = term.area();
        term.render_widget(AnalyticsView::new(&tracker, 30), area);

        assert!(term.buffer_contains("AI tools"));
        assert!(term.buffer_contains("Sourdough"));
        assert!(term.buffer_contains("refresh every 30s"));
        assert!(term.buffer_contains("Total reach"));
        assert!(term.buffer_contains("Sourdough · 15 days"));
    }
}
