//! Application rendering.

use itertools::Itertools;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use farfile_controller::{BrowserView, ChannelState};

use crate::theme::Theme;
use crate::ui::modals::{ConfirmModal, InputModal};
use crate::ui::{AppLayout, ContextMenuPopup, EditorPane, ListingView, NoticeBar, sanitize};

use super::input::InputState;

const LISTING_HINTS: [(&str, &str); 8] = [
    ("j/k", "Move"),
    ("Enter", "Open"),
    ("Bksp", "Back"),
    ("~", "Home"),
    ("a/A", "New"),
    ("m", "Menu"),
    ("R", "Refresh"),
    ("q", "Quit"),
];

const EDITOR_HINTS: [(&str, &str); 2] = [("Ctrl-S", "Save"), ("Esc", "Close")];

/// Everything needed to draw one frame.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub view: &'a BrowserView,
    pub layout: AppLayout,
    pub channel: ChannelState,
    pub cpu: Option<&'a str>,
    pub metrics_error: Option<&'a str>,
    pub list_offset: usize,
    pub editor_cursor: (usize, usize),
    pub editor_scroll: usize,
    pub menu_area: Option<Rect>,
    pub menu_cursor: usize,
    pub input: Option<&'a InputState>,
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    render_header(ctx, ctx.layout.header, buf);
    NoticeBar::new(ctx.theme, &ctx.view.notices).render(ctx.layout.notices, buf);

    match &ctx.view.editor {
        Some(editor) => {
            EditorPane::new(ctx.theme, editor, ctx.editor_cursor, ctx.editor_scroll)
                .render(ctx.layout.main, buf);
        }
        None => {
            let block = listing_block(ctx.theme);
            let inner = block.inner(ctx.layout.main);
            block.render(ctx.layout.main, buf);
            ListingView::new(ctx.theme, &ctx.view.body, ctx.list_offset).render(inner, buf);
        }
    }

    render_footer(ctx, ctx.layout.footer, buf);

    if let (Some(menu), Some(menu_area)) = (&ctx.view.menu, ctx.menu_area) {
        ContextMenuPopup::new(ctx.theme, menu, ctx.menu_cursor).render(menu_area, buf);
    }

    if let Some(prompt) = &ctx.view.prompt {
        if prompt.confirm {
            ConfirmModal::new(ctx.theme, &prompt.message).render(area, buf);
        } else if let Some(input) = ctx.input {
            InputModal::new(ctx.theme, input, "farfile", &prompt.message).render(area, buf);
        }
    }
}

/// Border around the listing rows.
pub fn listing_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let (status, color) = match ctx.channel {
        ChannelState::Connecting => ("connecting", ctx.theme.muted),
        ChannelState::Open => ("connected", ctx.theme.success),
        ChannelState::Closed => ("disconnected", ctx.theme.error),
    };

    let mut spans = vec![
        Span::styled(" farfile ", ctx.theme.title),
        Span::raw(sanitize(ctx.view.path.as_str())),
        Span::raw("  "),
        Span::styled(format!("[{status}]"), Style::default().fg(color)),
    ];

    match (ctx.cpu, ctx.metrics_error) {
        (_, Some(error)) => spans.push(Span::styled(
            format!("  CPU: {}", sanitize(error)),
            Style::default().fg(ctx.theme.error),
        )),
        (Some(cpu), None) => spans.push(Span::raw(format!("  CPU: {}", sanitize(cpu)))),
        (None, None) => {}
    }

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.header)
        .render(area, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let hints: &[(&str, &str)] = if ctx.view.editor.is_some() {
        &EDITOR_HINTS
    } else {
        &LISTING_HINTS
    };

    let hints = hints.iter().map(|(key, desc)| {
        vec![
            Span::styled(format!(" {key} "), ctx.theme.help_key),
            Span::styled(desc.to_string(), ctx.theme.help_desc),
        ]
    });
    let spans = Itertools::intersperse(hints, vec![Span::raw(" ")])
        .flatten()
        .collect_vec();

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.footer)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use farfile_controller::{
        EditorView, EntryRow, ListingBody, NoticeKind, NoticeView, PromptView,
    };
    use farfile_core::{EntryKind, RemotePath};

    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn view(body: ListingBody) -> BrowserView {
        BrowserView {
            path: RemotePath::new("~/projects").unwrap(),
            notices: Vec::new(),
            body,
            menu: None,
            editor: None,
            prompt: None,
        }
    }

    fn draw(view: &BrowserView, input: Option<&InputState>) -> String {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 70, 16);
        let ctx = RenderContext {
            theme: &theme,
            view,
            layout: AppLayout::new(area, view.notices.len()),
            channel: ChannelState::Open,
            cpu: Some("12.5%"),
            metrics_error: None,
            list_offset: 0,
            editor_cursor: (0, 0),
            editor_scroll: 0,
            menu_area: None,
            menu_cursor: 0,
            input,
        };
        let mut buf = Buffer::empty(area);
        render_app(&ctx, area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_listing_frame() {
        let mut view = view(ListingBody::Rows(vec![EntryRow {
            name: "notes.txt".to_string(),
            kind: EntryKind::File,
            glyph: None,
            size: "2.0 KB".to_string(),
            permissions: "-rw-r--r--".to_string(),
            selected: true,
        }]));
        view.notices.push(NoticeView {
            kind: NoticeKind::Success,
            text: "File saved successfully".to_string(),
        });

        let text = draw(&view, None);
        assert!(text.contains("~/projects"));
        assert!(text.contains("[connected]"));
        assert!(text.contains("CPU: 12.5%"));
        assert!(text.contains("File saved successfully"));
        assert!(text.contains("notes.txt"));
        assert!(text.contains("2.0 KB"));
        assert!(text.contains("Refresh"));
    }

    #[test]
    fn test_confirm_prompt_frame() {
        let mut view = view(ListingBody::Empty);
        view.prompt = Some(PromptView {
            message: "Are you sure you want to delete this file?\n\"a.txt\"".to_string(),
            initial: None,
            confirm: true,
        });

        let text = draw(&view, None);
        assert!(text.contains("Confirm Deletion"));
        assert!(text.contains("\"a.txt\""));
    }

    #[test]
    fn test_input_prompt_frame() {
        let mut view = view(ListingBody::Loading);
        view.prompt = Some(PromptView {
            message: "Enter new name:".to_string(),
            initial: Some("old.txt".to_string()),
            confirm: false,
        });
        let input = InputState::with_initial("old.txt");

        let text = draw(&view, Some(&input));
        assert!(text.contains("Enter new name:"));
        assert!(text.contains("old.txt"));
    }

    #[test]
    fn test_editor_frame() {
        let mut view = view(ListingBody::Empty);
        view.editor = Some(EditorView {
            path: RemotePath::new("~/projects/main.rs").unwrap(),
            content: "fn main() {}\n".to_string(),
        });

        let text = draw(&view, None);
        assert!(text.contains("Editing:"));
        assert!(text.contains("fn main() {}"));
        assert!(text.contains("Save"));
        assert!(!text.contains("Refresh"));
    }
}
