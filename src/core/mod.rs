//! # Core Domain Logic
//!
//! Everything that makes yamlui tick, with no terminal types in sight:
//!
//! - [`document`]: the parsed YAML tree and the id resolver
//! - [`field`]: the five field kinds and their mutation rules
//! - [`layout`]: pure box geometry, wrapping, and truncation
//! - [`nav`]: the navigation state machine (event in, effect out)
//! - [`save`]: the persistence merger for edited pages
//! - [`callbacks`]: name → save-callback registration table
//! - [`command`]: the shell command boundary
//! - [`config`]: ambient settings
//!
//! The `tui` module is the only consumer that touches a real terminal;
//! every transition and computation here is testable headlessly.

pub mod callbacks;
pub mod command;
pub mod config;
pub mod document;
pub mod field;
pub mod layout;
pub mod nav;
pub mod save;
