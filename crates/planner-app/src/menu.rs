//! Floating per-item action menu.

use planner_core::PlanItemRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    SaveToTab,
    Regenerate,
    SendToCanvas,
    CopyToClipboard,
}

impl ItemAction {
    pub const ALL: [ItemAction; 4] = [
        ItemAction::SaveToTab,
        ItemAction::Regenerate,
        ItemAction::SendToCanvas,
        ItemAction::CopyToClipboard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ItemAction::SaveToTab => "Save to tab",
            ItemAction::Regenerate => "Regenerate",
            ItemAction::SendToCanvas => "Send to canvas",
            ItemAction::CopyToClipboard => "Copy to clipboard",
        }
    }

    /// Key that triggers the entry while the menu is open.
    pub fn shortcut(&self) -> char {
        match self {
            ItemAction::SaveToTab => 's',
            ItemAction::Regenerate => 'r',
            ItemAction::SendToCanvas => 'c',
            ItemAction::CopyToClipboard => 'y',
        }
    }

    pub fn from_shortcut(c: char) -> Option<ItemAction> {
        Self::ALL.into_iter().find(|a| a.shortcut() == c)
    }
}

/// At most one menu is open; it belongs to a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMenuState {
    pub target: PlanItemRef,
    pub selected: usize,
}

impl ActionMenuState {
    pub fn new(target: PlanItemRef) -> Self {
        Self {
            target,
            selected: 0,
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % ItemAction::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(ItemAction::ALL.len() - 1);
    }

    pub fn current(&self) -> ItemAction {
        ItemAction::ALL[self.selected % ItemAction::ALL.len()]
    }
}
