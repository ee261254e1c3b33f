//! # Field Model
//!
//! The five field kinds a page can hold, their YAML projection, and the
//! mutation rules applied when a field is activated.
//!
//! All field mutation goes through [`activate`] and [`replace_text`];
//! nothing else in the crate touches field values.

use log::warn;
use serde_yaml::Value;

use crate::core::document::scalar_to_string;

/// One editable or display unit within a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Checkbox { key: String, title: String, value: bool },
    Radio { key: String, title: String, value: bool },
    TextBox { key: String, title: String, value: String },
    TextArea { key: String, title: String, value: String },
    TextDisplay { title: String, value: String },
}

/// Field kind, used for layout grouping and separator rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Checkbox,
    Radio,
    TextBox,
    TextArea,
    TextDisplay,
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Checkbox { .. } => FieldKind::Checkbox,
            Field::Radio { .. } => FieldKind::Radio,
            Field::TextBox { .. } => FieldKind::TextBox,
            Field::TextArea { .. } => FieldKind::TextArea,
            Field::TextDisplay { .. } => FieldKind::TextDisplay,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Field::Checkbox { title, .. }
            | Field::Radio { title, .. }
            | Field::TextBox { title, .. }
            | Field::TextArea { title, .. }
            | Field::TextDisplay { title, .. } => title,
        }
    }

    /// The persistable key/value pair, or `None` for display-only fields.
    pub fn save_entry(&self) -> Option<(String, Value)> {
        match self {
            Field::Checkbox { key, value, .. } | Field::Radio { key, value, .. } => {
                Some((key.clone(), Value::Bool(*value)))
            }
            Field::TextBox { key, value, .. } | Field::TextArea { key, value, .. } => {
                Some((key.clone(), Value::String(value.clone())))
            }
            Field::TextDisplay { .. } => None,
        }
    }

    /// Parse one page content entry. Unrecognized entries yield `None`.
    fn from_entry(mapping: &serde_yaml::Mapping) -> Option<Field> {
        let title = mapping
            .get("title")
            .and_then(scalar_to_string)
            .unwrap_or_default();
        let text_value = || {
            mapping
                .get("value")
                .and_then(scalar_to_string)
                .unwrap_or_default()
        };
        let bool_value = mapping.get("value").and_then(Value::as_bool).unwrap_or(false);

        if let Some(key) = mapping.get("checkbox").and_then(scalar_to_string) {
            Some(Field::Checkbox { key, title, value: bool_value })
        } else if let Some(key) = mapping.get("radio").and_then(scalar_to_string) {
            Some(Field::Radio { key, title, value: bool_value })
        } else if let Some(key) = mapping.get("textbox").and_then(scalar_to_string) {
            Some(Field::TextBox { key, title, value: text_value() })
        } else if let Some(key) = mapping.get("textarea").and_then(scalar_to_string) {
            Some(Field::TextArea { key, title, value: text_value() })
        } else if mapping.contains_key("textdisplay") {
            Some(Field::TextDisplay { title, value: text_value() })
        } else {
            None
        }
    }
}

/// Parse a page's content sequence into its field list. Entries that
/// carry no recognized field key are skipped with a warning.
pub fn fields_from_content(content: &[Value]) -> Vec<Field> {
    let mut fields = Vec::new();
    for (i, item) in content.iter().enumerate() {
        match item.as_mapping().and_then(Field::from_entry) {
            Some(field) => fields.push(field),
            None => warn!("skipping unrecognized page content entry #{i}"),
        }
    }
    fields
}

/// What the display layer must do to complete an activation.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// The field mutated in place; nothing further to do.
    Done,
    /// Open a single-line editor seeded with the current value.
    EditLine(String),
    /// Open a multi-line editor seeded with the current value.
    EditMultiline(String),
    /// Open the read-only viewer.
    View { title: String, content: String },
}

/// Apply the activate edit event to the field at `index`.
pub fn activate(fields: &mut [Field], index: usize) -> Activation {
    if matches!(fields[index], Field::Radio { .. }) {
        select_radio(fields, index);
        return Activation::Done;
    }
    match &mut fields[index] {
        Field::Checkbox { value, .. } => {
            *value = !*value;
            Activation::Done
        }
        Field::Radio { .. } => Activation::Done,
        Field::TextBox { value, .. } => Activation::EditLine(value.clone()),
        Field::TextArea { value, .. } => Activation::EditMultiline(value.clone()),
        Field::TextDisplay { title, value } => Activation::View {
            title: title.clone(),
            content: value.clone(),
        },
    }
}

/// Replace the text of the textbox/textarea at `index` with the edited
/// result, verbatim (an empty string is a valid result). Other kinds
/// are left untouched.
pub fn replace_text(fields: &mut [Field], index: usize, text: String) {
    match &mut fields[index] {
        Field::TextBox { value, .. } | Field::TextArea { value, .. } => *value = text,
        _ => {}
    }
}

/// Select the radio at `index` and clear every other member of its
/// contiguous run. Runs are determined purely by adjacency: the scan
/// stops at the first non-radio neighbor in each direction.
fn select_radio(fields: &mut [Field], index: usize) {
    let set = |fields: &mut [Field], i: usize, v: bool| {
        if let Field::Radio { value, .. } = &mut fields[i] {
            *value = v;
        }
    };
    set(fields, index, true);
    for i in index + 1..fields.len() {
        if !matches!(fields[i], Field::Radio { .. }) {
            break;
        }
        set(fields, i, false);
    }
    for i in (0..index).rev() {
        if !matches!(fields[i], Field::Radio { .. }) {
            break;
        }
        set(fields, i, false);
    }
}
