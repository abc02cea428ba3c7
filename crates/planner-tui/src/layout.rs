//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Header height: top border + title/tab row + bottom border
pub const HEADER_HEIGHT: u16 = 3;

/// Below this width split views stack vertically
pub const NARROW_WIDTH: u16 = 90;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, view tabs, credits and plan tier
    pub header: Rect,

    /// Active view
    pub body: Rect,

    /// Keybinding hints for the focused pane
    pub status: Rect,
}

pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// Split a view body into a primary and a secondary pane.
///
/// Side by side when wide enough, stacked otherwise.
pub fn split_panes(area: Rect, primary_percent: u16) -> (Rect, Rect) {
    let chunks = if area.width >= NARROW_WIDTH {
        Layout::horizontal([
            Constraint::Percentage(primary_percent),
            Constraint::Percentage(100 - primary_percent),
        ])
        .split(area)
    } else {
        Layout::vertical([
            Constraint::Percentage(primary_percent),
            Constraint::Percentage(100 - primary_percent),
        ])
        .split(area)
    };
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_areas_contiguous() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = create(area);

        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.body.y, HEADER_HEIGHT);
        assert_eq!(
            layout.header.height + layout.body.height + layout.status.height,
            area.height
        );
    }

    #[test]
    fn test_split_side_by_side_when_wide() {
        let (left, right) = split_panes(Rect::new(0, 0, 120, 20), 40);
        assert_eq!(left.height, 20);
        assert_eq!(right.height, 20);
        assert_eq!(left.width + right.width, 120);
        assert_eq!(right.x, left.width);
    }

    #[test]
    fn test_split_stacks_when_narrow() {
        let (top, bottom) = split_panes(Rect::new(0, 0, 60, 20), 50);
        assert_eq!(top.width, 60);
        assert_eq!(bottom.width, 60);
        assert_eq!(bottom.y, top.height);
    }
}
