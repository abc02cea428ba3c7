//! Rendered plan: every non-empty section in display order, with the
//! actionable items selectable and flagged while a regeneration or save
//! is in flight.

use std::collections::{HashMap, HashSet};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use planner_app::services::ReservationId;
use planner_app::SaveTarget;
use planner_core::{ContentStrategyPlanOutput, PlanItemRef, PlanSection};

use crate::theme::styles;

use super::text::truncate;

pub struct PlanView<'a> {
    plan: Option<&'a ContentStrategyPlanOutput>,
    selected: Option<PlanItemRef>,
    regenerating: Option<&'a HashMap<PlanItemRef, ReservationId>>,
    saving: Option<&'a HashSet<SaveTarget>>,
    focused: bool,
    error: Option<&'a str>,
}

impl<'a> PlanView<'a> {
    pub fn new(plan: Option<&'a ContentStrategyPlanOutput>) -> Self {
        Self {
            plan,
            selected: None,
            regenerating: None,
            saving: None,
            focused: false,
            error: None,
        }
    }

    pub fn selected(mut self, selected: Option<PlanItemRef>) -> Self {
        self.selected = selected;
        self
    }

    pub fn in_flight(
        mut self,
        regenerating: &'a HashMap<PlanItemRef, ReservationId>,
        saving: &'a HashSet<SaveTarget>,
    ) -> Self {
        self.regenerating = Some(regenerating);
        self.saving = Some(saving);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    fn is_regenerating(&self, target: PlanItemRef) -> bool {
        self.regenerating.is_some_and(|s| s.contains_key(&target))
    }

    fn is_saving(&self, target: PlanItemRef) -> bool {
        self.saving
            .is_some_and(|s| s.contains(&SaveTarget::Item(target)))
    }

    /// All lines plus the index of the selected item's line.
    fn build_lines(&self, plan: &ContentStrategyPlanOutput, width: usize) -> (Vec<Line<'static>>, Option<usize>) {
        let mut lines = Vec::new();
        let mut selected_line = None;

        for section in PlanSection::ALL {
            if section.is_empty(plan) {
                continue;
            }
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(section.title().to_string(), styles::accent_bold())));

            for text in section.section_lines(plan) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", truncate(&text, width.saturating_sub(2))),
                    styles::text_secondary(),
                )));
            }

            for target in section.item_refs(plan) {
                let Some(item) = plan.item(target) else {
                    continue;
                };
                let is_selected = self.selected == Some(target);
                if is_selected {
                    selected_line = Some(lines.len());
                }

                let mut tags = String::new();
                if self.is_regenerating(target) {
                    tags.push_str(" ⟳ regenerating");
                }
                if self.is_saving(target) {
                    tags.push_str(" saving…");
                }

                let title_width = width.saturating_sub(4 + tags.chars().count());
                let title = truncate(item.title(), title_width);
                let row_style = match (is_selected, self.focused) {
                    (true, true) => styles::focused_selected(),
                    (true, false) => styles::unfocused_selected(),
                    _ => styles::text_primary(),
                };
                lines.push(Line::from(vec![
                    Span::styled(if is_selected { "▸ " } else { "• " }, styles::accent()),
                    Span::styled(title, row_style),
                    Span::styled(tags, styles::status_yellow()),
                ]));

                // Details of the selected item, below its title
                if is_selected {
                    for detail in item.to_text().lines().skip(1).filter(|l| !l.trim().is_empty()) {
                        lines.push(Line::from(Span::styled(
                            format!("    {}", truncate(detail, width.saturating_sub(4))),
                            styles::text_secondary(),
                        )));
                    }
                }
            }
        }
        (lines, selected_line)
    }
}

impl Widget for PlanView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(" Content strategy ");
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let Some(plan) = self.plan else {
            let mut lines = vec![Line::from(Span::styled(
                "No strategy yet. Fill in the form and press Ctrl+g.",
                styles::text_muted(),
            ))];
            if let Some(error) = self.error {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(error.to_string(), styles::status_red())));
            }
            Paragraph::new(lines).render(inner, buf);
            return;
        };

        let (mut lines, selected_line) = self.build_lines(plan, inner.width as usize);
        if let Some(error) = self.error {
            lines.insert(0, Line::from(Span::styled(error.to_string(), styles::status_red())));
        }

        // Keep the selection in the upper third of the viewport
        let height = inner.height as usize;
        let offset = selected_line
            .map(|line| line.saturating_sub(height / 3))
            .unwrap_or(0)
            .min(lines.len().saturating_sub(height));

        Paragraph::new(lines)
            .scroll((offset as u16, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use planner_app::test_utils::test_plan;

    #[test]
    fn test_empty_state_prompts_for_generation() {
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(PlanView::new(None).error(Some("Generation failed")), area);

        assert!(term.buffer_contains("No strategy yet"));
        assert!(term.buffer_contains("Generation failed"));
    }

    #[test]
    fn test_sections_and_items_render() {
        let plan = test_plan();
        let mut term = TestTerminal::with_size(100, 60);
        let area = term.area();
        term.render_widget(PlanView::new(Some(&plan)), area);

        assert!(term.buffer_contains(PlanSection::ExecutiveSummary.title()));
        assert!(term.buffer_contains(PlanSection::Goals.title()));
        assert!(term.buffer_contains(&truncate(&plan.goals[0].title, 90)));
    }

    #[test]
    fn test_selected_item_shows_details_and_flags() {
        let plan = test_plan();
        let target = PlanItemRef::Pillar(0);
        let regenerating: HashMap<_, _> = [(target, ReservationId::new_v4())]
            .into_iter()
            .collect();
        let saving: HashSet<_> = [SaveTarget::Item(target)].into_iter().collect();

        let mut term = TestTerminal::with_size(120, 30);
        let area = term.area();
        term.render_widget(
            PlanView::new(Some(&plan))
                .selected(Some(target))
                .in_flight(&regenerating, &saving)
                .focused(true),
            area,
        );

        assert!(term.buffer_contains("⟳ regenerating"));
        assert!(term.buffer_contains("saving…"));
        assert!(term.buffer_contains(&truncate(&plan.content_pillars[0].name, 60)));
    }

    #[test]
    fn test_scrolls_to_selection() {
        let plan = test_plan();
        let last = *plan.item_refs().last().unwrap();
        let title = plan.item(last).unwrap().title().to_string();

        let mut term = TestTerminal::with_size(100, 12);
        let area = term.area();
        term.render_widget(PlanView::new(Some(&plan)).selected(Some(last)), area);

        assert!(term.buffer_contains(&truncate(&title, 80)));
        assert!(!term.buffer_contains(PlanSection::ExecutiveSummary.title()));
    }
}
