//! # Page Form Component
//!
//! Renders a page's field list as a centered bordered box. Every row
//! belonging to the field under the cursor is highlighted, so a wrapped
//! textarea highlights as one unit. Separator rows stay unstyled.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::core::field::Field;
use crate::core::layout::{self, Viewport};

use super::draw_diagnostic;

/// Transient render wrapper over the active page's props.
pub struct PageForm<'a> {
    title: &'a str,
    fields: &'a [Field],
    cursor: usize,
}

impl<'a> PageForm<'a> {
    pub fn new(title: &'a str, fields: &'a [Field], cursor: usize) -> Self {
        Self { title, fields, cursor }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let viewport = Viewport::new(area.width, area.height);

        let layout = match layout::layout_page(self.title, self.fields, viewport) {
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

        let block = Block::bordered().title(self.title);
        let lines: Vec<Line> = layout
            .rows
            .iter()
            .map(|row| {
                let line = Line::from(row.text.as_str());
                if row.field == Some(self.cursor) {
                    line.style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
                } else {
                    line
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), outer);
    }
}
