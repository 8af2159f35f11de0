//! TUI Widget components
//!
//! One module per panel of the journal screen.

pub mod checklist;
pub mod footer;
pub mod form;
pub mod modal;
pub mod sentiment;

pub use checklist::render_checklist;
pub use footer::render_footer;
pub use form::render_form;
pub use modal::{render_help, render_report_modal};
pub use sentiment::render_sentiment;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Rectangle of `width` x `height` centered in `area`, clamped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(area, 60, 20);
        assert_eq!(rect, Rect::new(20, 10, 60, 20));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(area, 60, 20);
        assert_eq!(rect, area);
    }
}
