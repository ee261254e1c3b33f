//! # TUI Components
//!
//! One file per component, each holding its state, event handling,
//! rendering, and tests:
//!
//! - `menu_box`: the centered menu selector
//! - `page_form`: the centered page field list
//! - `popup`: a one-shot message box, dismissed by any key
//! - `editor`: the line/multiline text editor overlay
//! - `viewer`: the scrollable read-only text viewer overlay
//!
//! Components receive core state as props (borrowed views); geometry
//! comes from `core::layout` so the rendering here stays mechanical.

pub mod editor;
pub mod menu_box;
pub mod page_form;
pub mod popup;
pub mod viewer;

pub use editor::{Editor, EditorEvent};
pub use menu_box::MenuBox;
pub use page_form::PageForm;
pub use popup::Popup;
pub use viewer::ViewerState;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};

/// Full-area diagnostic shown when a box cannot be laid out for the
/// current viewport.
pub(super) fn draw_diagnostic(frame: &mut Frame, message: &str) {
    let paragraph = Paragraph::new(message)
        .block(Block::bordered().title("ERROR").border_style(Style::default().fg(Color::Red)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, frame.area());
}
