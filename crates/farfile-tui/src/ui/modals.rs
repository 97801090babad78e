//! Modal dialog widgets.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::app::input::InputState;
use crate::theme::Theme;
use crate::ui::{centered, sanitize};

/// Yes/no confirmation, used before deleting.
pub struct ConfirmModal<'a> {
    theme: &'a Theme,
    message: &'a str,
}

impl<'a> ConfirmModal<'a> {
    pub fn new(theme: &'a Theme, message: &'a str) -> Self {
        Self { theme, message }
    }
}

impl Widget for ConfirmModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message_lines = self.message.lines().count() as u16;
        let popup_area = centered(area, 60, message_lines + 5);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Confirm Deletion ")
            .title_style(
                Style::default()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let mut lines: Vec<Line> = self
            .message
            .lines()
            .map(|line| Line::raw(sanitize(line)))
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" y/Enter ", self.theme.help_key),
            Span::raw("Confirm  "),
            Span::styled(" n/Esc ", self.theme.help_key),
            Span::raw("Cancel"),
        ]));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Text input modal for rename/create prompts.
pub struct InputModal<'a> {
    theme: &'a Theme,
    input: &'a InputState,
    title: &'a str,
    prompt: &'a str,
}

impl<'a> InputModal<'a> {
    pub fn new(theme: &'a Theme, input: &'a InputState, title: &'a str, prompt: &'a str) -> Self {
        Self {
            theme,
            input,
            title,
            prompt,
        }
    }
}

impl Widget for InputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered(area, 50, 7);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let mut lines = vec![
            Line::styled(self.prompt, self.theme.help_desc),
            Line::raw(""),
        ];

        // Scroll the field so the cursor stays visible
        let chars: Vec<char> = self.input.buffer().chars().collect();
        let cursor = self.input.cursor();
        let max_visible = (inner.width as usize).saturating_sub(4).max(1);
        let start = (cursor + 1).saturating_sub(max_visible);

        let before: String = chars[start..cursor].iter().collect();
        let at: String = chars
            .get(cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = chars
            .iter()
            .skip(cursor + 1)
            .take(max_visible.saturating_sub(cursor - start + 1))
            .collect();

        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::raw(sanitize(&before)),
            Span::styled(at, self.theme.cursor),
            Span::raw(sanitize(&after)),
        ]));

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", self.theme.help_key),
            Span::raw("Confirm  "),
            Span::styled(" Esc ", self.theme.help_key),
            Span::raw("Cancel"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}
