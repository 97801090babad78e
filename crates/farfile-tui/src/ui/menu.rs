//! Context menu popup.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use farfile_controller::MenuView;
use farfile_core::MenuFootprint;

use crate::theme::Theme;

/// Screen rectangle occupied by `menu`, clipped to `screen`.
pub fn menu_rect(menu: &MenuView, footprint: MenuFootprint, screen: Rect) -> Rect {
    let x = u16::try_from(menu.position.x).unwrap_or(u16::MAX);
    let y = u16::try_from(menu.position.y).unwrap_or(u16::MAX);
    let width = u16::try_from(footprint.width).unwrap_or(u16::MAX);
    let height = u16::try_from(footprint.height).unwrap_or(u16::MAX);
    Rect::new(x, y, width, height).intersection(screen)
}

/// Popup listing the menu actions with one highlighted.
pub struct ContextMenuPopup<'a> {
    theme: &'a Theme,
    menu: &'a MenuView,
    cursor: usize,
}

impl<'a> ContextMenuPopup<'a> {
    pub fn new(theme: &'a Theme, menu: &'a MenuView, cursor: usize) -> Self {
        Self {
            theme,
            menu,
            cursor,
        }
    }
}

impl Widget for ContextMenuPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border)
            .style(self.theme.menu);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .menu
            .items
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let line = Line::raw(format!(" {}", action.label()));
                if i == self.cursor {
                    line.style(self.theme.selected)
                } else {
                    line
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
