//! # Viewer Component
//!
//! Full-content scroll view for textdisplay fields whose inline
//! rendering is capped. Wraps the text to the current width and lets
//! the scroll position persist across frames.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState};

use crate::core::layout;
use crate::tui::event::TuiEvent;

/// Persistent scroll state for the open viewer.
pub struct ViewerState {
    title: String,
    content: String,
    scroll: ScrollViewState,
}

impl ViewerState {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            scroll: ScrollViewState::default(),
        }
    }

    /// Feed one input event. Returns true when the viewer should close.
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Escape | TuiEvent::Submit => return true,
            TuiEvent::Up => self.scroll.scroll_up(),
            TuiEvent::Down => self.scroll.scroll_down(),
            TuiEvent::PageUp => self.scroll.scroll_page_up(),
            TuiEvent::PageDown => self.scroll.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll.scroll_to_top(),
            TuiEvent::CursorEnd => self.scroll.scroll_to_bottom(),
            _ => {}
        }
        false
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let outer = Rect {
            x: area.width / 10,
            y: area.height / 10,
            width: area.width - area.width / 5,
            height: area.height - area.height / 5,
        };

        frame.render_widget(Clear, outer);
        let block = Block::bordered()
            .title(self.title.as_str())
            .title_bottom(" Up/Down scroll / Esc close ");
        let inner = block.inner(outer);
        frame.render_widget(block, outer);

        let wrap_width = inner.width.saturating_sub(1).max(1) as usize;
        let lines = layout::wrap_text(&self.content, wrap_width);
        let mut scroll_view =
            ScrollView::new(Size::new(wrap_width as u16, lines.len() as u16));
        let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
        scroll_view.render_widget(
            Paragraph::new(text),
            Rect::new(0, 0, wrap_width as u16, lines.len() as u16),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_escape_closes() {
        let mut viewer = ViewerState::new("MOTD", "hello");
        assert!(!viewer.handle_event(TuiEvent::Down));
        assert!(viewer.handle_event(TuiEvent::Escape));
    }

    #[test]
    fn test_render_shows_title_and_content() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut viewer = ViewerState::new("MOTD", "welcome to the machine");
        terminal.draw(|f| viewer.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("MOTD"));
        assert!(text.contains("welcome to the machine"));
    }
}
