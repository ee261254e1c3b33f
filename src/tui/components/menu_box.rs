//! # Menu Selector Component
//!
//! Renders the active menu as a centered bordered box with one row per
//! entry, the selected row highlighted. Geometry comes from the layout
//! engine; a layout overflow turns into the full-area diagnostic.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::core::layout::{self, Viewport};
use crate::core::nav::MenuView;

use super::draw_diagnostic;

/// Transient render wrapper borrowing the active menu view.
pub struct MenuBox<'a> {
    view: &'a MenuView,
}

impl<'a> MenuBox<'a> {
    pub fn new(view: &'a MenuView) -> Self {
        Self { view }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let viewport = Viewport::new(area.width, area.height);
        let titles: Vec<String> =
            self.view.entries.iter().map(|e| e.title.clone()).collect();

        let layout = match layout::layout_menu(&self.view.title, &titles, viewport) {
            Ok(layout) => layout,
            Err(e) => {
                draw_diagnostic(frame, &e.to_string());
                return;
            }
        };

        let outer = Rect {
            x: layout.geometry.x,
            y: layout.geometry.y,
            width: layout.geometry.width,
            height: layout.geometry.height,
        };
        frame.render_widget(Clear, outer);

        let block = Block::bordered().title(self.view.title.as_str());
        let lines: Vec<Line> = layout
            .rows
            .iter()
            .map(|row| {
                let line = Line::from(row.text.as_str());
                if row.field == Some(self.view.cursor) {
                    line.style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
                } else {
                    line
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), outer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::MenuEntry;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn view() -> MenuView {
        MenuView {
            id: "root".into(),
            title: "Main menu".into(),
            entries: vec![
                MenuEntry { id: "a".into(), title: "Networking".into() },
                MenuEntry { id: "b".into(), title: "Disk".into() },
            ],
            cursor: 1,
        }
    }

    #[test]
    fn test_render_shows_entries_and_title() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let view = view();
        terminal.draw(|f| MenuBox::new(&view).render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Main menu"));
        assert!(text.contains("Networking"));
        assert!(text.contains("Disk"));
    }

    #[test]
    fn test_render_tiny_terminal_shows_diagnostic() {
        let backend = TestBackend::new(8, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let view = view();
        terminal.draw(|f| MenuBox::new(&view).render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("ERROR"));
    }
}
