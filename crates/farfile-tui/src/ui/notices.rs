//! Notice lines above the listing.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use farfile_controller::{NoticeKind, NoticeView};

use crate::theme::Theme;
use crate::ui::sanitize;

/// Newest notices first, one per line.
pub struct NoticeBar<'a> {
    theme: &'a Theme,
    notices: &'a [NoticeView],
}

impl<'a> NoticeBar<'a> {
    pub fn new(theme: &'a Theme, notices: &'a [NoticeView]) -> Self {
        Self { theme, notices }
    }
}

impl Widget for NoticeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .notices
            .iter()
            .take(area.height as usize)
            .map(|notice| {
                let color = match notice.kind {
                    NoticeKind::Success => self.theme.success,
                    NoticeKind::Error => self.theme.error,
                };
                Line::styled(
                    format!(" {}", sanitize(&notice.text)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}
