//! # Layout Engine
//!
//! Pure geometry for menu and page boxes: row construction, wrapping,
//! truncation, and centering within a viewport. No I/O and no terminal
//! types. The TUI layer maps the produced rows onto styled widgets.
//!
//! Sizing rules per field kind:
//!
//! - checkbox / radio / textbox: one row each
//! - textarea: a title row plus wrapped content, capped at
//!   [`TEXTAREA_MAX_LINES`] content lines
//! - textdisplay: wrapped content only, capped at [`DISPLAY_MAX_LINES`]
//!   lines
//!
//! Whenever a cap or the viewport truncates content, the tail of the
//! last shown line is replaced with [`TRUNCATION_MARKER`]. A box that
//! cannot fit the viewport even after truncation yields
//! [`LayoutError::Overflow`]; the caller shows a diagnostic instead of
//! rendering.
//!
//! Layout is deterministic: the same inputs always produce the same
//! geometry.

use std::fmt;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::field::{Field, FieldKind};

/// Marker replacing the tail of truncated content.
pub const TRUNCATION_MARKER: &str = "...";
/// Maximum rendered lines for a textdisplay field.
pub const DISPLAY_MAX_LINES: usize = 5;
/// Maximum rendered content lines for a textarea field.
pub const TEXTAREA_MAX_LINES: usize = 6;
/// Extra columns reserved around checkbox/radio titles for the glyph.
const GLYPH_PAD: usize = 6;
/// Horizontal viewport columns kept free around a box.
const H_MARGIN: u16 = 4;
/// Vertical viewport rows kept free around a box.
const V_MARGIN: u16 = 2;

/// The available terminal drawing area at layout time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Outer box placement, borders included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGeometry {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// One rendered row inside a box. `field` is the index of the menu item
/// or page field the row belongs to; `None` marks a separator row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub field: Option<usize>,
    pub text: String,
}

/// A fully computed box: placement plus its rows, each already clamped
/// to the box's inner width.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxLayout {
    pub geometry: BoxGeometry,
    pub rows: Vec<Row>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Content cannot fit the viewport even after truncation.
    Overflow,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Overflow => write!(f, "content does not fit the viewport"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Compute the centered box for a menu's item list.
pub fn layout_menu(title: &str, items: &[String], viewport: Viewport) -> Result<BoxLayout, LayoutError> {
    let max_inner = max_inner_width(viewport)?;
    let natural = items
        .iter()
        .map(|item| display_width(item))
        .max()
        .unwrap_or(0)
        .max(display_width(title) + 2)
        .max(1);
    let inner = natural.min(max_inner);

    let rows: Vec<Row> = items
        .iter()
        .enumerate()
        .map(|(i, item)| Row {
            field: Some(i),
            text: pad_to(truncate_display(item, inner), inner),
        })
        .collect();

    finish(rows, inner, viewport)
}

/// Compute the centered box for a page's field list.
pub fn layout_page(title: &str, fields: &[Field], viewport: Viewport) -> Result<BoxLayout, LayoutError> {
    let max_inner = max_inner_width(viewport)?;
    let natural = fields
        .iter()
        .map(natural_width)
        .max()
        .unwrap_or(0)
        .max(display_width(title) + 2)
        .max(1);
    let inner = natural.min(max_inner);

    let mut rows = Vec::new();
    let mut prev_kind: Option<FieldKind> = None;
    for (i, field) in fields.iter().enumerate() {
        let kind = field.kind();
        if prev_kind.is_some_and(|p| p != kind) {
            rows.push(Row { field: None, text: pad_to(String::new(), inner) });
        }
        prev_kind = Some(kind);
        for text in field_rows(field, inner) {
            rows.push(Row { field: Some(i), text: pad_to(text, inner) });
        }
    }

    finish(rows, inner, viewport)
}

/// Rows for a single field, each clamped to `inner` columns.
fn field_rows(field: &Field, inner: usize) -> Vec<String> {
    match field {
        Field::Checkbox { title, value, .. } => {
            let mark = if *value { 'x' } else { ' ' };
            vec![truncate_display(&format!("[{mark}] {title}"), inner)]
        }
        Field::Radio { title, value, .. } => {
            let mark = if *value { 'o' } else { ' ' };
            vec![truncate_display(&format!("({mark}) {title}"), inner)]
        }
        Field::TextBox { title, value, .. } => {
            vec![truncate_display(&format!("{title}: {value}"), inner)]
        }
        Field::TextArea { title, value, .. } => {
            let mut rows = vec![truncate_display(&format!("{title}:"), inner)];
            rows.extend(wrap_capped(value, inner, TEXTAREA_MAX_LINES));
            rows
        }
        Field::TextDisplay { value, .. } => wrap_capped(value, inner, DISPLAY_MAX_LINES),
    }
}

/// Wrap `text` to `width` columns, keeping at most `cap` lines. When the
/// wrapped content exceeds the cap, the tail of the last kept line is
/// replaced with the truncation marker.
fn wrap_capped(text: &str, width: usize, cap: usize) -> Vec<String> {
    let wrapped = wrap_text(text, width);
    if wrapped.len() <= cap {
        return wrapped;
    }
    let mut kept: Vec<String> = wrapped[..cap].to_vec();
    if let Some(last) = kept.last_mut() {
        *last = append_marker(last, width);
    }
    kept
}

/// Wrap one field's text to `width` columns. Always yields at least one
/// (possibly empty) line so every field occupies a row.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() || width == 0 {
        return vec![String::new()];
    }
    let options = textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let lines: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Append the truncation marker, dropping tail characters as needed so
/// the result still fits `max_width`.
fn append_marker(line: &str, max_width: usize) -> String {
    if display_width(line) + TRUNCATION_MARKER.len() <= max_width {
        return format!("{line}{TRUNCATION_MARKER}");
    }
    truncate_display(line, max_width)
}

/// Truncate `s` to at most `max_width` display columns, replacing the
/// tail with the truncation marker when anything is cut.
pub fn truncate_display(s: impl AsRef<str>, max_width: usize) -> String {
    let s = s.as_ref();
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= TRUNCATION_MARKER.len() {
        return ".".repeat(max_width);
    }
    let keep = max_width - TRUNCATION_MARKER.len();
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > keep {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(TRUNCATION_MARKER);
    out
}

fn natural_width(field: &Field) -> usize {
    match field {
        Field::Checkbox { title, .. } | Field::Radio { title, .. } => {
            display_width(title) + GLYPH_PAD
        }
        Field::TextBox { title, value, .. } => display_width(title) + 2 + display_width(value),
        Field::TextArea { title, value, .. } => {
            longest_line(value).max(display_width(title) + 1)
        }
        Field::TextDisplay { title, value } => longest_line(value).max(display_width(title)),
    }
}

fn longest_line(text: &str) -> usize {
    text.lines().map(display_width).max().unwrap_or(0)
}

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn pad_to(mut s: String, width: usize) -> String {
    let mut w = display_width(&s);
    while w < width {
        s.push(' ');
        w += 1;
    }
    s
}

/// Inner width available for box content, or Overflow when the viewport
/// is too narrow to show even a marker.
fn max_inner_width(viewport: Viewport) -> Result<usize, LayoutError> {
    let inner = viewport.width.saturating_sub(H_MARGIN + 2) as usize;
    if inner <= TRUNCATION_MARKER.len() {
        return Err(LayoutError::Overflow);
    }
    Ok(inner)
}

/// Validate height and center the finished box in the viewport.
fn finish(rows: Vec<Row>, inner: usize, viewport: Viewport) -> Result<BoxLayout, LayoutError> {
    let height = rows.len() as u16 + 2;
    let width = inner as u16 + 2;
    if height > viewport.height.saturating_sub(V_MARGIN) {
        return Err(LayoutError::Overflow);
    }
    let geometry = BoxGeometry {
        x: viewport.width.saturating_sub(width) / 2,
        y: viewport.height.saturating_sub(height) / 2,
        width,
        height,
    };
    Ok(BoxLayout { geometry, rows })
}
