//! UI components and widgets.

mod editor;
mod listing;
mod menu;
pub mod modals;
mod notices;

pub use editor::EditorPane;
pub use listing::{ListingView, scroll_offset};
pub use menu::{ContextMenuPopup, menu_rect};
pub use notices::NoticeBar;

use ratatui::layout::{Constraint, Layout, Rect};

/// Layout areas for the application.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppLayout {
    pub header: Rect,
    pub notices: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area, leaving one line per notice.
    pub fn new(area: Rect, notice_count: usize) -> Self {
        let notice_height = notice_count.min(3) as u16;

        let [header, notices, main, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(notice_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            header,
            notices,
            main,
            footer,
        }
    }
}

/// Remove control characters so peer-supplied names cannot drive the
/// terminal.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Rectangle of at most `width` x `height` centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
