//! yamlui turns a declarative YAML document into a navigable terminal
//! interface of menus and pages. The `core` module holds the document
//! model, state machine, layout, and persistence; `tui` is the only
//! module that knows the interface runs in a terminal.

pub mod core;
pub mod tui;
