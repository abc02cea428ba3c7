//! Semantic style builders.

use planner_app::notice::NoticeCategory;
use planner_core::{ContentStatus, TemplateTier};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Keybinding hint
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - used for focused+selected items across widgets
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Selected row in an unfocused list
pub fn unfocused_selected() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .add_modifier(Modifier::REVERSED)
}

/// Control that cannot be used yet
pub fn disabled() -> Style {
    Style::default()
        .fg(palette::TEXT_MUTED)
        .add_modifier(Modifier::DIM)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Domain mappings ---

/// Border and title colour of a notice modal.
pub fn notice_style(category: NoticeCategory) -> Style {
    let color = match category {
        NoticeCategory::Precondition => palette::STATUS_YELLOW,
        NoticeCategory::OperationFailed => palette::STATUS_RED,
        NoticeCategory::Success => palette::STATUS_GREEN,
        NoticeCategory::Info => palette::STATUS_BLUE,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn tier_style(tier: TemplateTier) -> Style {
    match tier {
        TemplateTier::Free => text_secondary(),
        TemplateTier::Premium => Style::default().fg(palette::TIER_PREMIUM),
        TemplateTier::Ultimate => Style::default()
            .fg(palette::TIER_ULTIMATE)
            .add_modifier(Modifier::BOLD),
    }
}

pub fn content_status_style(status: ContentStatus) -> Style {
    match status {
        ContentStatus::Draft => text_muted(),
        ContentStatus::Scheduled => status_yellow(),
        ContentStatus::Published => status_green(),
        ContentStatus::Cancelled => status_red(),
    }
}
