//! # Editor Component
//!
//! Text entry overlay used for textbox and textarea fields. Holds the
//! buffer and a byte-offset cursor between frames. Single-line editors
//! submit on Enter; multiline editors insert a newline on Enter and
//! submit on Ctrl+D. Esc cancels either kind without touching the field.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::event::TuiEvent;

/// What the run loop should do with a finished editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Submit(String),
    Cancel,
}

/// Persistent editing state for the active field.
pub struct Editor {
    title: String,
    text: String,
    /// Byte offset into `text`, always on a char boundary.
    cursor: usize,
    multiline: bool,
}

impl Editor {
    pub fn line(title: impl Into<String>, seed: impl Into<String>) -> Self {
        let text = seed.into();
        let cursor = text.len();
        Self { title: title.into(), text, cursor, multiline: false }
    }

    pub fn multiline(title: impl Into<String>, seed: impl Into<String>) -> Self {
        let text = seed.into();
        let cursor = text.len();
        Self { title: title.into(), text, cursor, multiline: true }
    }

    /// Feed one input event. Returns Some when the editor is finished.
    pub fn handle_event(&mut self, event: TuiEvent) -> Option<EditorEvent> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c),
            TuiEvent::Submit if self.multiline => self.insert('\n'),
            TuiEvent::Submit => return Some(EditorEvent::Submit(self.text.clone())),
            TuiEvent::EndOfInput => return Some(EditorEvent::Submit(self.text.clone())),
            TuiEvent::Escape => return Some(EditorEvent::Cancel),
            TuiEvent::Backspace => self.delete_backward(),
            TuiEvent::Delete => self.delete_forward(),
            TuiEvent::CursorLeft => self.cursor = self.prev_boundary(self.cursor),
            TuiEvent::CursorRight => self.cursor = self.next_boundary(self.cursor),
            TuiEvent::CursorHome => self.cursor = self.line_start(self.cursor),
            TuiEvent::CursorEnd => self.cursor = self.line_end(self.cursor),
            TuiEvent::Up if self.multiline => self.move_vertical(-1),
            TuiEvent::Down if self.multiline => self.move_vertical(1),
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let lines: Vec<&str> = self.text.split('\n').collect();

        let inner_height = if self.multiline { 6 } else { 1 };
        let width = area.width.saturating_sub(8).clamp(24, 72);
        let height = (inner_height + 2).min(area.height);
        let popup = Rect {
            x: area.width.saturating_sub(width) / 2,
            y: area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);
        let hint = if self.multiline {
            " Ctrl+D save / Esc cancel "
        } else {
            " Enter save / Esc cancel "
        };
        let block = Block::bordered()
            .title(self.title.as_str())
            .title_bottom(hint);

        // Keep the cursor's line in view for tall multiline buffers.
        let (cursor_line, cursor_col) = self.line_col();
        let first_visible = cursor_line.saturating_sub(inner_height as usize - 1);
        let visible: Vec<Line> = lines
            .iter()
            .skip(first_visible)
            .take(inner_height as usize)
            .map(|l| Line::from(*l))
            .collect();
        frame.render_widget(Paragraph::new(visible).block(block), popup);

        let inner_width = width.saturating_sub(2) as usize;
        let col = cursor_col.min(inner_width.saturating_sub(1)) as u16;
        let row = (cursor_line - first_visible) as u16;
        frame.set_cursor_position(Position::new(popup.x + 1 + col, popup.y + 1 + row));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn delete_backward(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary(self.cursor);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary(self.cursor);
            self.text.drain(self.cursor..next);
        }
    }

    fn prev_boundary(&self, from: usize) -> usize {
        let mut pos = from;
        while pos > 0 {
            pos -= 1;
            if self.text.is_char_boundary(pos) {
                return pos;
            }
        }
        0
    }

    fn next_boundary(&self, from: usize) -> usize {
        let mut pos = from;
        while pos < self.text.len() {
            pos += 1;
            if self.text.is_char_boundary(pos) {
                return pos;
            }
        }
        self.text.len()
    }

    fn line_start(&self, from: usize) -> usize {
        self.text[..from].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, from: usize) -> usize {
        self.text[from..]
            .find('\n')
            .map(|i| from + i)
            .unwrap_or(self.text.len())
    }

    /// Zero-based (line, display column) of the cursor.
    fn line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let col_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        (line, before[col_start..].width())
    }

    fn move_vertical(&mut self, delta: isize) {
        let (line, col) = self.line_col();
        let target = line as isize + delta;
        if target < 0 {
            return;
        }
        let lines: Vec<&str> = self.text.split('\n').collect();
        let target = target as usize;
        if target >= lines.len() {
            return;
        }
        // Byte offset of the target line, then clamp the column by chars.
        let mut offset = 0;
        for l in lines.iter().take(target) {
            offset += l.len() + 1;
        }
        let target_line = lines[target];
        let mut byte_col = target_line.len();
        let mut seen = 0;
        for (i, _) in target_line.char_indices() {
            if seen == col {
                byte_col = i;
                break;
            }
            seen += 1;
        }
        self.cursor = offset + byte_col;
    }
}
