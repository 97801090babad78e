//! Editor pane.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use farfile_controller::EditorView;

use crate::theme::Theme;
use crate::ui::sanitize;

/// Shows the open file with a block cursor.
pub struct EditorPane<'a> {
    theme: &'a Theme,
    editor: &'a EditorView,
    /// Cursor as (line, column in chars).
    cursor: (usize, usize),
    scroll: usize,
}

impl<'a> EditorPane<'a> {
    pub fn new(
        theme: &'a Theme,
        editor: &'a EditorView,
        cursor: (usize, usize),
        scroll: usize,
    ) -> Self {
        Self {
            theme,
            editor,
            cursor,
            scroll,
        }
    }

    /// Inner text area for a pane drawn in `area`.
    pub fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" Editing: "),
                Span::styled(sanitize(self.editor.path.as_str()), self.theme.title),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .editor
            .content
            .split('\n')
            .skip(self.scroll)
            .take(inner.height as usize)
            .map(|line| Line::raw(line.replace('\t', "    ")))
            .collect();
        Paragraph::new(lines).render(inner, buf);

        let (row, col) = self.cursor;
        let visible_row = row.saturating_sub(self.scroll);
        if row < self.scroll || visible_row >= inner.height as usize {
            return;
        }
        let y = inner.y + visible_row as u16;
        let line = self.editor.content.split('\n').nth(row).unwrap_or("");
        let prefix: String = line.chars().take(col).collect();
        let offset = u16::try_from(prefix.replace('\t', "    ").width()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset);
        if inner.contains(Position::new(x, y)) {
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_style(self.theme.cursor);
            }
        }
    }
}
