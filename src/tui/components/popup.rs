//! # Popup Component
//!
//! Small centered message box. The run loop dismisses it on the next
//! key press; this type only knows how to draw itself.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::core::layout;

/// Transient render wrapper for a one-shot message.
pub struct Popup<'a> {
    message: &'a str,
}

impl<'a> Popup<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let max_text_width = (area.width.saturating_sub(8).max(10)) as usize;

        let lines = layout::wrap_text(self.message, max_text_width);
        let text_width = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(12) as u16;

        let width = (text_width + 4).min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let popup = Rect {
            x: area.width.saturating_sub(width) / 2,
            y: area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);
        let block = Block::bordered().title("Message");
        let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
        frame.render_widget(Paragraph::new(text).block(block).centered(), popup);
    }
}
