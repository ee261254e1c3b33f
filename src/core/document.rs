//! # Document Model
//!
//! The parsed YAML menu document and the tree resolver.
//!
//! A document is a nested tree of mappings and sequences. A node is a
//! mapping carrying either `menu: <id>` or `page: <id>` plus a `title`
//! and a `content` sequence. Pages may also carry `on_save` with the
//! name of a registered save callback. The top-level mapping is itself
//! the root menu and may carry a `commands` string.
//!
//! Identifiers are resolved by a full depth-first traversal of the
//! tree. If an id appears more than once, the *last* match in traversal
//! order wins; duplicates are reported as a warning at load time.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_yaml::Value;

/// Maximum nesting depth accepted during validation. Documents deeper
/// than this are rejected as malformed rather than risking unbounded
/// recursion in the resolver.
pub const MAX_DEPTH: usize = 64;

/// Node kind: the key under which an id appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Menu,
    Page,
}

/// Result of resolving an id against the document tree.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub kind: NodeKind,
    pub title: String,
    pub content: Vec<Value>,
    pub on_save: Option<String>,
}

/// One selectable entry in a menu's content sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
}

#[derive(Debug)]
pub enum DocumentError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Malformed(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Io(e) => write!(f, "document I/O error: {e}"),
            DocumentError::Parse(e) => write!(f, "document parse error: {e}"),
            DocumentError::Malformed(msg) => write!(f, "malformed document: {msg}"),
        }
    }
}

impl std::error::Error for DocumentError {}

/// A loaded and validated menu document.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    root: Value,
    root_id: String,
    root_title: String,
}

impl Document {
    /// Read, parse, and validate a YAML document from `path`.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = fs::read_to_string(path).map_err(DocumentError::Io)?;
        let root: Value = serde_yaml::from_str(&text).map_err(DocumentError::Parse)?;
        let doc = Self::from_value(root, path.to_path_buf())?;
        info!("Loaded document {} (root: {})", path.display(), doc.root_id);
        Ok(doc)
    }

    /// Validate an already-parsed tree. Used directly by tests.
    pub fn from_value(root: Value, path: PathBuf) -> Result<Self, DocumentError> {
        let mapping = root
            .as_mapping()
            .ok_or_else(|| DocumentError::Malformed("top level is not a mapping".into()))?;

        let root_id = string_key(mapping, "menu")
            .ok_or_else(|| DocumentError::Malformed("root is missing the `menu` key".into()))?;
        let root_title = string_key(mapping, "title")
            .ok_or_else(|| DocumentError::Malformed("root is missing the `title` key".into()))?;
        if !mapping.contains_key("content") {
            return Err(DocumentError::Malformed(
                "root is missing the `content` key".into(),
            ));
        }

        validate_node(&root, 0)?;
        lint_duplicate_ids(&root);

        Ok(Self {
            path,
            root,
            root_id,
            root_title,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root_title(&self) -> &str {
        &self.root_title
    }

    /// The top-level `commands` string, if the document declares one.
    pub fn commands(&self) -> Option<String> {
        self.root.as_mapping().and_then(|m| string_key(m, "commands"))
    }

    /// Resolve `id` against the whole tree.
    ///
    /// Full depth-first traversal; each new match overwrites the previous
    /// one, so the last match in traversal order wins. Returns `None` when
    /// no node carries `id`. Callers treat this as "stay in place".
    pub fn resolve(&self, id: &str) -> Option<Resolved> {
        let mut found = None;
        walk_resolve(&self.root, id, &mut found);
        found
    }

    /// Project a menu node's content sequence into selectable entries.
    /// Entries without a recognized `menu`/`page` key are skipped.
    pub fn menu_entries(content: &[Value]) -> Vec<MenuEntry> {
        let mut entries = Vec::new();
        for item in content {
            let Some(mapping) = item.as_mapping() else {
                continue;
            };
            let id = string_key(mapping, "menu").or_else(|| string_key(mapping, "page"));
            if let Some(id) = id {
                let title = string_key(mapping, "title").unwrap_or_else(|| id.clone());
                entries.push(MenuEntry { id, title });
            }
        }
        entries
    }
}

fn string_key(mapping: &serde_yaml::Mapping, key: &str) -> Option<String> {
    mapping.get(key).and_then(scalar_to_string)
}

/// Render a scalar Value as a plain string (YAML numbers and bools
/// included, so `menu: 42` still yields an id).
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn walk_resolve(value: &Value, id: &str, found: &mut Option<Resolved>) {
    match value {
        Value::Mapping(mapping) => {
            for (key, val) in mapping {
                let is_match = scalar_to_string(val).as_deref() == Some(id);
                if is_match
                    && let Some(kind) = key.as_str().and_then(node_kind)
                {
                    *found = Some(Resolved {
                        kind,
                        title: string_key(mapping, "title").unwrap_or_else(|| id.to_string()),
                        content: mapping
                            .get("content")
                            .and_then(|c| c.as_sequence())
                            .cloned()
                            .unwrap_or_default(),
                        on_save: string_key(mapping, "on_save"),
                    });
                }
                if matches!(val, Value::Mapping(_) | Value::Sequence(_)) {
                    walk_resolve(val, id, found);
                }
            }
        }
        Value::Sequence(seq) => {
            for item in seq {
                if matches!(item, Value::Mapping(_) | Value::Sequence(_)) {
                    walk_resolve(item, id, found);
                }
            }
        }
        _ => {}
    }
}

fn node_kind(key: &str) -> Option<NodeKind> {
    match key {
        "menu" => Some(NodeKind::Menu),
        "page" => Some(NodeKind::Page),
        _ => None,
    }
}

/// Structural validation: every `content` value must be a sequence of
/// mappings, and nesting must stay within MAX_DEPTH.
fn validate_node(value: &Value, depth: usize) -> Result<(), DocumentError> {
    if depth > MAX_DEPTH {
        return Err(DocumentError::Malformed(format!(
            "nesting exceeds maximum depth of {MAX_DEPTH}"
        )));
    }
    if let Some(mapping) = value.as_mapping()
        && let Some(content) = mapping.get("content")
    {
        let Some(seq) = content.as_sequence() else {
            return Err(DocumentError::Malformed(
                "a `content` value is not a sequence".into(),
            ));
        };
        for item in seq {
            if !item.is_mapping() {
                return Err(DocumentError::Malformed(
                    "a `content` entry is not a mapping".into(),
                ));
            }
            validate_node(item, depth + 1)?;
        }
    }
    Ok(())
}

/// Collect all menu/page ids and warn about duplicates. Ambiguous ids
/// still resolve (last match wins) but are almost always a mistake.
fn lint_duplicate_ids(root: &Value) {
    let mut ids = Vec::new();
    collect_ids(root, &mut ids);
    ids.sort();
    for pair in ids.windows(2) {
        if pair[0] == pair[1] {
            warn!("duplicate id '{}': last occurrence wins on resolve", pair[0]);
        }
    }
}

fn collect_ids(value: &Value, ids: &mut Vec<String>) {
    match value {
        Value::Mapping(mapping) => {
            for (key, val) in mapping {
                if key.as_str().and_then(node_kind).is_some()
                    && let Some(id) = scalar_to_string(val)
                {
                    ids.push(id);
                }
                collect_ids(val, ids);
            }
        }
        Value::Sequence(seq) => {
            for item in seq {
                collect_ids(item, ids);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Document {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        Document::from_value(value, PathBuf::from("test.yaml")).unwrap()
    }

    const SAMPLE: &str = r#"
menu: root
title: Main menu
commands: "echo hello"
content:
  - menu: net
    title: Networking
    content:
      - page: ifaces
        title: Interfaces
        on_save: iface_check
        content:
          - checkbox: dhcp
            title: Use DHCP
            value: true
  - page: general
    title: General setup
    content: []
"#;

    #[test]
    fn test_resolve_menu_node() {
        let d = doc(SAMPLE);
        let r = d.resolve("net").unwrap();
        assert_eq!(r.kind, NodeKind::Menu);
        assert_eq!(r.title, "Networking");
        assert_eq!(r.content.len(), 1);
        assert!(r.on_save.is_none());
    }

    #[test]
    fn test_resolve_page_node_with_on_save() {
        let d = doc(SAMPLE);
        let r = d.resolve("ifaces").unwrap();
        assert_eq!(r.kind, NodeKind::Page);
        assert_eq!(r.on_save.as_deref(), Some("iface_check"));
    }

    #[test]
    fn test_resolve_root_id() {
        let d = doc(SAMPLE);
        let r = d.resolve("root").unwrap();
        assert_eq!(r.kind, NodeKind::Menu);
        assert_eq!(r.title, "Main menu");
        assert_eq!(r.content.len(), 2);
    }

    #[test]
    fn test_resolve_unknown_id_is_none() {
        let d = doc(SAMPLE);
        assert!(d.resolve("nope").is_none());
    }

    #[test]
    fn test_resolve_duplicate_id_last_match_wins() {
        let d = doc(r#"
menu: root
title: Root
content:
  - page: dup
    title: First
    content: []
  - page: dup
    title: Second
    content: []
"#);
        let r = d.resolve("dup").unwrap();
        assert_eq!(r.title, "Second");
    }

    #[test]
    fn test_menu_entries_skip_unrecognized() {
        let d = doc(SAMPLE);
        let r = d.resolve("root").unwrap();
        let entries = Document::menu_entries(&r.content);
        assert_eq!(
            entries,
            vec![
                MenuEntry { id: "net".into(), title: "Networking".into() },
                MenuEntry { id: "general".into(), title: "General setup".into() },
            ]
        );
    }

    #[test]
    fn test_commands_key() {
        let d = doc(SAMPLE);
        assert_eq!(d.commands().as_deref(), Some("echo hello"));
    }

    #[test]
    fn test_missing_root_keys_are_malformed() {
        let value: Value = serde_yaml::from_str("title: No menu key\ncontent: []").unwrap();
        let err = Document::from_value(value, PathBuf::from("t.yaml")).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));

        let value: Value = serde_yaml::from_str("menu: root\ntitle: No content").unwrap();
        let err = Document::from_value(value, PathBuf::from("t.yaml")).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn test_non_sequence_content_is_malformed() {
        let value: Value =
            serde_yaml::from_str("menu: root\ntitle: Bad\ncontent: \"not a list\"").unwrap();
        let err = Document::from_value(value, PathBuf::from("t.yaml")).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn test_excessive_nesting_is_malformed() {
        let mut yaml = String::from("menu: root\ntitle: Deep\ncontent:\n");
        let mut indent = String::from("  ");
        for i in 0..=MAX_DEPTH {
            yaml.push_str(&format!("{indent}- menu: m{i}\n"));
            yaml.push_str(&format!("{indent}  title: M{i}\n"));
            yaml.push_str(&format!("{indent}  content:\n"));
            indent.push_str("    ");
        }
        yaml.push_str(&format!("{indent}- page: leaf\n"));
        yaml.push_str(&format!("{indent}  title: Leaf\n"));
        yaml.push_str(&format!("{indent}  content: []\n"));
        let value: Value = serde_yaml::from_str(&yaml).unwrap();
        let err = Document::from_value(value, PathBuf::from("t.yaml")).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn test_numeric_id_resolves() {
        let d = doc(r#"
menu: root
title: Root
content:
  - page: 42
    title: Answer
    content: []
"#);
        let r = d.resolve("42").unwrap();
        assert_eq!(r.title, "Answer");
    }
}
