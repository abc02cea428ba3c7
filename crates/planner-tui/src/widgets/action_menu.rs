//! Floating per-item action menu

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use planner_app::{ActionMenuState, ItemAction};

use crate::theme::styles;

use super::modal_overlay::{centered_rect, render_shadow};
use super::text::truncate;

const MENU_WIDTH: u16 = 36;

pub struct ActionMenu<'a> {
    menu: &'a ActionMenuState,
    item_title: &'a str,
    regenerate_cost: u32,
    busy: bool,
}

impl<'a> ActionMenu<'a> {
    pub fn new(menu: &'a ActionMenuState, item_title: &'a str) -> Self {
        Self {
            menu,
            item_title,
            regenerate_cost: 1,
            busy: false,
        }
    }

    pub fn regenerate_cost(mut self, cost: u32) -> Self {
        self.regenerate_cost = cost;
        self
    }

    /// The item already has a regeneration in flight
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    /// Rect the menu occupies inside `area`
    pub fn area(area: Rect) -> Rect {
        centered_rect(MENU_WIDTH, ItemAction::ALL.len() as u16 + 2, area)
    }

    fn entry_label(&self, action: ItemAction) -> String {
        match action {
            ItemAction::Regenerate if self.busy => "Regenerating…".to_string(),
            ItemAction::Regenerate => {
                let unit = if self.regenerate_cost == 1 { "credit" } else { "credits" };
                format!("{} ({} {})", action.label(), self.regenerate_cost, unit)
            }
            _ => action.label().to_string(),
        }
    }
}

impl Widget for ActionMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = Self::area(area);
        Clear.render(rect, buf);
        render_shadow(buf, rect);

        let title = format!(" {} ", truncate(self.item_title, MENU_WIDTH as usize - 4));
        let block = styles::modal_block(&title);
        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines: Vec<Line> = ItemAction::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let style = if i == self.menu.selected {
                    styles::focused_selected()
                } else if *action == ItemAction::Regenerate && self.busy {
                    styles::disabled()
                } else {
                    styles::text_primary()
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", action.shortcut()), styles::keybinding()),
                    Span::styled(format!("{:<width$}", self.entry_label(*action), width = inner.width.saturating_sub(3) as usize), style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use planner_core::PlanItemRef;

    #[test]
    fn test_menu_lists_all_actions_with_shortcuts() {
        let menu = ActionMenuState::new(PlanItemRef::Goal(0));
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(ActionMenu::new(&menu, "Brand awareness").regenerate_cost(1), area);

        assert!(term.buffer_contains("Brand awareness"));
        assert!(term.buffer_contains("Regenerate (1 credit)"));
        for action in ItemAction::ALL {
            assert!(term.buffer_contains(&format!(" {} ", action.shortcut())));
        }
    }

    #[test]
    fn test_busy_item_shows_regenerating() {
        let menu = ActionMenuState::new(PlanItemRef::Pillar(1));
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(ActionMenu::new(&menu, "Recipes").regenerate_cost(2).busy(true), area);

        assert!(term.buffer_contains("Regenerating…"));
        assert!(!term.buffer_contains("2 credits"));
    }
}
