//! # Persistence Merger
//!
//! Converts an edited page's fields into a flat key→value record and
//! merges it into a sibling YAML store keyed by page id, leaving the
//! source document untouched.
//!
//! The store lives next to the source: `name.yaml` → `name_data.yaml`
//! (`.yml` likewise); any other path gets `_data.yaml` appended. The
//! derivation never yields the source path itself. Writes go through a
//! `.tmp` file plus rename so a failed write cannot leave a mangled
//! store behind.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_yaml::Value;

use crate::core::callbacks::CallbackRegistry;
use crate::core::field::Field;

/// Flattened snapshot of a page's persistable fields.
pub type SaveRecord = BTreeMap<String, Value>;

#[derive(Debug)]
pub enum SaveError {
    /// No safe sibling path could be derived from the source path.
    PathDerivation(PathBuf),
    Io(io::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::PathDerivation(p) => {
                write!(f, "cannot derive a store path from {}", p.display())
            }
            SaveError::Io(e) => write!(f, "store I/O error: {e}"),
            SaveError::Yaml(e) => write!(f, "store YAML error: {e}"),
        }
    }
}

impl std::error::Error for SaveError {}

/// Result of a save request.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The store was written; `log` is the callback's output (empty if none).
    Saved { log: String },
    /// The page has no persistable fields; nothing was written.
    NothingToSave,
}

/// Build the record from the persistable field kinds. TextDisplay
/// fields never appear in the record.
pub fn build_record(fields: &[Field]) -> SaveRecord {
    fields.iter().filter_map(Field::save_entry).collect()
}

/// Derive the sibling store path for `source`.
pub fn derive_store_path(source: &Path) -> Result<PathBuf, SaveError> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SaveError::PathDerivation(source.to_path_buf()))?;

    let sibling = match source.extension().and_then(|e| e.to_str()) {
        Some(ext @ ("yaml" | "yml")) => {
            let stem = &name[..name.len() - ext.len() - 1];
            source.with_file_name(format!("{stem}_data.{ext}"))
        }
        _ => source.with_file_name(format!("{name}_data.yaml")),
    };

    if sibling == source {
        return Err(SaveError::PathDerivation(source.to_path_buf()));
    }
    Ok(sibling)
}

/// Save a page: build the record, run the optional callback, merge the
/// record into the sibling store under `page_id`, and write it back.
pub fn save_page(
    source: &Path,
    page_id: &str,
    on_save: Option<&str>,
    fields: &[Field],
    registry: &CallbackRegistry,
) -> Result<SaveOutcome, SaveError> {
    let mut record = build_record(fields);
    if record.is_empty() {
        debug!("page '{page_id}' has no persistable fields");
        return Ok(SaveOutcome::NothingToSave);
    }

    let log = match on_save {
        Some(name) => registry.invoke(name, &mut record),
        None => String::new(),
    };

    let store_path = derive_store_path(source)?;
    let mut store = load_store(&store_path)?;
    store.insert(Value::from(page_id), record_to_value(&record));
    atomic_write_yaml(&store_path, &Value::Mapping(store))?;
    info!("saved page '{page_id}' to {}", store_path.display());

    Ok(SaveOutcome::Saved { log })
}

/// Load the sibling store, treating a missing or empty file as an
/// empty store.
pub fn load_store(path: &Path) -> Result<serde_yaml::Mapping, SaveError> {
    if !path.exists() {
        return Ok(serde_yaml::Mapping::new());
    }
    let text = fs::read_to_string(path).map_err(SaveError::Io)?;
    if text.trim().is_empty() {
        return Ok(serde_yaml::Mapping::new());
    }
    let value: Value = serde_yaml::from_str(&text).map_err(SaveError::Yaml)?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Ok(serde_yaml::Mapping::new()),
    }
}

fn record_to_value(record: &SaveRecord) -> Value {
    let mut mapping = serde_yaml::Mapping::new();
    for (key, value) in record {
        mapping.insert(Value::from(key.as_str()), value.clone());
    }
    Value::Mapping(mapping)
}

/// Write YAML atomically: serialize to a `.tmp` sibling, then rename.
fn atomic_write_yaml(path: &Path, value: &Value) -> Result<(), SaveError> {
    let text = serde_yaml::to_string(value).map_err(SaveError::Yaml)?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, text).map_err(SaveError::Io)?;
    fs::rename(&tmp_path, path).map_err(SaveError::Io)?;
    Ok(())
}
