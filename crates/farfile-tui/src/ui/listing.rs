//! Directory listing widget.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use farfile_controller::constants::{EMPTY_DIRECTORY, LOADING};
use farfile_controller::{EntryRow, ListingBody};

use crate::theme::Theme;
use crate::ui::sanitize;

const SIZE_WIDTH: usize = 10;
const PERMISSIONS_WIDTH: usize = 10;
const GLYPH_WIDTH: usize = 3;

/// Renders the rows of a listing, starting at `offset`.
pub struct ListingView<'a> {
    theme: &'a Theme,
    body: &'a ListingBody,
    offset: usize,
}

impl<'a> ListingView<'a> {
    pub fn new(theme: &'a Theme, body: &'a ListingBody, offset: usize) -> Self {
        Self {
            theme,
            body,
            offset,
        }
    }

    fn row_line(&self, row: &EntryRow, width: usize) -> Line<'static> {
        let name_width = width
            .saturating_sub(GLYPH_WIDTH + SIZE_WIDTH + PERMISSIONS_WIDTH + 2)
            .max(1);
        let name_style = if row.kind.is_dir() {
            self.theme.directory
        } else {
            self.theme.file
        };

        let glyph = match row.glyph {
            Some(glyph) => pad_to(glyph, GLYPH_WIDTH),
            None => " ".repeat(GLYPH_WIDTH),
        };

        let line = Line::from(vec![
            Span::raw(glyph),
            Span::styled(
                pad_to(&truncate(&sanitize(&row.name), name_width), name_width),
                name_style,
            ),
            Span::raw(" "),
            Span::styled(
                format!(
                    "{:>width$}",
                    truncate(&sanitize(&row.size), SIZE_WIDTH),
                    width = SIZE_WIDTH
                ),
                Style::default().fg(self.theme.muted),
            ),
            Span::raw(" "),
            Span::styled(
                truncate(&sanitize(&row.permissions), PERMISSIONS_WIDTH),
                self.theme.permissions,
            ),
        ]);

        if row.selected {
            line.style(self.theme.selected)
        } else {
            line
        }
    }
}

impl Widget for ListingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let placeholder = match self.body {
            ListingBody::Loading => Some(LOADING),
            ListingBody::Empty => Some(EMPTY_DIRECTORY),
            ListingBody::Rows(_) => None,
        };
        if let Some(text) = placeholder {
            let y = area.y + area.height / 2;
            Paragraph::new(Line::styled(text, Style::default().fg(self.theme.muted)))
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, y, area.width, area.height.min(1)), buf);
            return;
        }

        let ListingBody::Rows(rows) = self.body else {
            return;
        };
        let width = area.width as usize;
        let lines: Vec<Line> = rows
            .iter()
            .skip(self.offset)
            .take(area.height as usize)
            .map(|row| self.row_line(row, width))
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}

/// First visible row so that `selected` stays inside `height` rows.
pub fn scroll_offset(
    current: usize,
    selected: Option<usize>,
    height: usize,
    total: usize,
) -> usize {
    let mut offset = current.min(total.saturating_sub(1));
    if let Some(selected) = selected {
        if selected < offset {
            offset = selected;
        } else if height > 0 && selected >= offset + height {
            offset = selected + 1 - height;
        }
    }
    offset
}

/// Truncate `text` to `width` display columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad `text` with spaces to `width` display columns.
fn pad_to(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(padding))
}
