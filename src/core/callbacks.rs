//! # Save Callbacks
//!
//! An explicit registration table mapping callback names (the `on_save`
//! key of a page) to functions supplied by the embedding application.
//! Callbacks may mutate the record before it is persisted and return a
//! log string shown to the user; an unregistered name is not an error.

use std::collections::HashMap;

use log::{debug, info};

use crate::core::save::SaveRecord;

/// A save callback: receives the page's record, may coerce or reject
/// values in place, and returns a log string (empty for silence).
pub type SaveCallback = Box<dyn Fn(&mut SaveRecord) -> String>;

#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<String, SaveCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, callback: SaveCallback) {
        let name = name.into();
        info!("registered save callback '{name}'");
        self.callbacks.insert(name, callback);
    }

    /// Invoke the named callback against `record`. Returns its log
    /// string, or an empty string when the name is not registered.
    pub fn invoke(&self, name: &str, record: &mut SaveRecord) -> String {
        match self.callbacks.get(name) {
            Some(callback) => callback(record),
            None => {
                debug!("save callback '{name}' not registered, skipping");
                String::new()
            }
        }
    }
}
