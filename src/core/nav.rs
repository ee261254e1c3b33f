//! # Navigation State Machine
//!
//! Owns the current position in the document tree and the cursor within
//! the active menu or page. Input events go in, the next state plus a
//! requested side effect comes out:
//!
//! ```text
//! Nav + NavEvent  →  handle()  →  mutated Nav + Effect
//! ```
//!
//! No I/O happens here. Opening editors, showing popups, running
//! commands, and saving are all expressed as [`Effect`] values that the
//! TUI layer interprets. This keeps every transition testable without a
//! terminal.
//!
//! History is a single explicit stack of menu ids: push on entering a
//! submenu, pop on leaving. Entering a page does not push; the
//! enclosing menu's cursor is remembered and restored on `Back`.

use log::{debug, warn};

use crate::core::document::{Document, MenuEntry, NodeKind, Resolved};
use crate::core::field::{self, Activation, Field};

/// Abstract input vocabulary consumed by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Up,
    Down,
    Activate,
    Back,
    Save,
    RunCommands,
    Quit,
}

/// Side effect requested from the display/persistence boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Open a single-line editor; the result comes back via [`Nav::apply_edit`].
    EditLine { seed: String },
    /// Open a multi-line editor; the result comes back via [`Nav::apply_edit`].
    EditMultiline { seed: String },
    /// Open the read-only text viewer.
    ViewText { title: String, content: String },
    /// Show a message popup.
    Popup(String),
    /// Run the document's `commands` string.
    RunCommands,
    /// Persist the current page (only emitted while a page is active).
    SavePage,
    Quit,
}

/// The active menu: id, title, resolved entries, and cursor.
#[derive(Debug, Clone)]
pub struct MenuView {
    pub id: String,
    pub title: String,
    pub entries: Vec<MenuEntry>,
    pub cursor: usize,
}

/// The active page: id, title, parsed fields, and cursor. The cursor of
/// the enclosing menu is kept so `Back` can restore it.
#[derive(Debug, Clone)]
pub struct PageView {
    pub id: String,
    pub title: String,
    pub fields: Vec<Field>,
    pub cursor: usize,
    pub on_save: Option<String>,
    return_cursor: usize,
}

#[derive(Debug, Clone)]
pub enum View {
    Menu(MenuView),
    Page(PageView),
    Terminated,
}

pub struct Nav {
    /// Path of visited menu ids; the last element is the active menu.
    history: Vec<String>,
    pub view: View,
}

impl Nav {
    /// Start at the document's root menu with the first item selected.
    pub fn new(doc: &Document) -> Self {
        let root = MenuView {
            id: doc.root_id().to_string(),
            title: doc.root_title().to_string(),
            entries: Document::menu_entries(
                &doc.resolve(doc.root_id()).map(|r| r.content).unwrap_or_default(),
            ),
            cursor: 0,
        };
        Self {
            history: vec![root.id.clone()],
            view: View::Menu(root),
        }
    }

    /// Depth of the history stack. Root-only is 1.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Process one input event against the document.
    pub fn handle(&mut self, doc: &Document, event: NavEvent) -> Effect {
        match event {
            NavEvent::Quit => {
                self.view = View::Terminated;
                Effect::Quit
            }
            NavEvent::RunCommands => Effect::RunCommands,
            NavEvent::Up => {
                self.move_cursor(-1);
                Effect::None
            }
            NavEvent::Down => {
                self.move_cursor(1);
                Effect::None
            }
            NavEvent::Activate => self.activate(doc),
            NavEvent::Back => self.back(doc),
            NavEvent::Save => match self.view {
                View::Page(_) => Effect::SavePage,
                _ => Effect::None,
            },
        }
    }

    /// Complete a text edit started by an `EditLine`/`EditMultiline`
    /// effect: replace the active field's value with the edited result.
    pub fn apply_edit(&mut self, text: String) {
        if let View::Page(page) = &mut self.view
            && page.cursor < page.fields.len()
        {
            field::replace_text(&mut page.fields, page.cursor, text);
        }
    }

    /// Move the cursor with wraparound within the active list.
    fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match &mut self.view {
            View::Menu(menu) => (&mut menu.cursor, menu.entries.len()),
            View::Page(page) => (&mut page.cursor, page.fields.len()),
            View::Terminated => return,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = if delta < 0 {
            if *cursor == 0 { len - 1 } else { *cursor - 1 }
        } else {
            if *cursor + 1 >= len { 0 } else { *cursor + 1 }
        };
    }

    fn activate(&mut self, doc: &Document) -> Effect {
        match &mut self.view {
            View::Menu(menu) => {
                let Some(entry) = menu.entries.get(menu.cursor) else {
                    return Effect::None;
                };
                let Some(resolved) = doc.resolve(&entry.id) else {
                    warn!("id '{}' not found in document, staying in place", entry.id);
                    return Effect::Popup(format!("No node with id '{}'", entry.id));
                };
                let return_cursor = menu.cursor;
                match resolved.kind {
                    NodeKind::Menu => {
                        debug!("entering menu '{}'", entry.id);
                        self.history.push(entry.id.clone());
                        self.view = View::Menu(menu_view(entry.id.clone(), resolved));
                    }
                    NodeKind::Page => {
                        debug!("opening page '{}'", entry.id);
                        self.view = View::Page(PageView {
                            id: entry.id.clone(),
                            title: resolved.title,
                            fields: field::fields_from_content(&resolved.content),
                            cursor: 0,
                            on_save: resolved.on_save,
                            return_cursor,
                        });
                    }
                }
                Effect::None
            }
            View::Page(page) => {
                if page.fields.is_empty() {
                    return Effect::None;
                }
                match field::activate(&mut page.fields, page.cursor) {
                    Activation::Done => Effect::None,
                    Activation::EditLine(seed) => Effect::EditLine { seed },
                    Activation::EditMultiline(seed) => Effect::EditMultiline { seed },
                    Activation::View { title, content } => Effect::ViewText { title, content },
                }
            }
            View::Terminated => Effect::None,
        }
    }

    fn back(&mut self, doc: &Document) -> Effect {
        match &self.view {
            View::Page(page) => {
                // Leave the page: rebuild the enclosing menu (top of
                // history) and restore its cursor.
                let cursor = page.return_cursor;
                let menu_id = self.history.last().cloned().unwrap_or_default();
                match doc.resolve(&menu_id) {
                    Some(resolved) => {
                        let mut menu = menu_view(menu_id, resolved);
                        menu.cursor = cursor.min(menu.entries.len().saturating_sub(1));
                        self.view = View::Menu(menu);
                        Effect::None
                    }
                    None => {
                        warn!("enclosing menu '{menu_id}' vanished from document");
                        Effect::Popup(format!("No node with id '{menu_id}'"))
                    }
                }
            }
            View::Menu(_) => {
                // Leaving the root menu is a no-op.
                if self.history.len() <= 1 {
                    return Effect::None;
                }
                self.history.pop();
                let menu_id = self.history.last().cloned().unwrap_or_default();
                match doc.resolve(&menu_id) {
                    Some(resolved) => {
                        self.view = View::Menu(menu_view(menu_id, resolved));
                        Effect::None
                    }
                    None => {
                        warn!("menu '{menu_id}' vanished from document");
                        Effect::Popup(format!("No node with id '{menu_id}'"))
                    }
                }
            }
            View::Terminated => Effect::None,
        }
    }
}

fn menu_view(id: String, resolved: Resolved) -> MenuView {
    MenuView {
        id,
        title: resolved.title,
        entries: Document::menu_entries(&resolved.content),
        cursor: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::Document;
    use serde_yaml::Value;
    use std::path::PathBuf;

    fn doc(yaml: &str) -> Document {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        Document::from_value(value, PathBuf::from("test.yaml")).unwrap()
    }

    fn sample_doc() -> Document {
        doc(r#"
menu: root
title: Main menu
commands: "true"
content:
  - menu: sub
    title: Submenu
    content:
      - page: settings
        title: Settings
        content:
          - checkbox: a
            title: Alpha
          - radio: b
            title: Beta
            value: true
          - radio: c
            title: Gamma
          - textbox: name
            title: Name
            value: box
  - page: empty
    title: Empty page
    content: []
"#)
    }

    fn menu_cursor(nav: &Nav) -> usize {
        match &nav.view {
            View::Menu(m) => m.cursor,
            _ => panic!("not at a menu"),
        }
    }

    #[test]
    fn test_initial_state_is_root_menu() {
        let d = sample_doc();
        let nav = Nav::new(&d);
        assert_eq!(nav.depth(), 1);
        match &nav.view {
            View::Menu(m) => {
                assert_eq!(m.id, "root");
                assert_eq!(m.entries.len(), 2);
                assert_eq!(m.cursor, 0);
            }
            _ => panic!("expected menu view"),
        }
    }

    #[test]
    fn test_cursor_wraps_both_directions() {
        let d = sample_doc();
        let mut nav = Nav::new(&d);
        nav.handle(&d, NavEvent::Up);
        assert_eq!(menu_cursor(&nav), 1);
        nav.handle(&d, NavEvent::Down);
        assert_eq!(menu_cursor(&nav), 0);
        nav.handle(&d, NavEvent::Down);
        nav.handle(&d, NavEvent::Down);
        assert_eq!(menu_cursor(&nav), 0);
    }

    #[test]
    fn test_enter_and_leave_menu_restores_history() {
        let d = sample_doc();
        let mut nav = Nav::new(&d);
        nav.handle(&d, NavEvent::Activate); // into "sub"
        assert_eq!(nav.depth(), 2);
        match &nav.view {
            View::Menu(m) => assert_eq!(m.id, "sub"),
            _ => panic!("expected menu view"),
        }
        nav.handle(&d, NavEvent::Back);
        assert_eq!(nav.depth(), 1);
        match &nav.view {
            View::Menu(m) => assert_eq!(m.id, "root"),
            _ => panic!("expected menu view"),
        }
    }

    #[test]
    fn test_back_at_root_is_noop() {
        let d = sample_doc();
        let mut nav = Nav::new(&d);
        nav.handle(&d, NavEvent::Down);
        let effect = nav.handle(&d, NavEvent::Back);
        assert_eq!(effect, Effect::None);
        assert_eq!(nav.depth(), 1);
        assert_eq!(menu_cursor(&nav), 1);
    }

    #[test]
    fn test_open_page_and_back_restores_menu_cursor() {
        let d = sample_doc();
        let mut nav = Nav::new(&d);
        nav.handle(&d, NavEvent::Down); // select "empty" page
        nav.handle(&d, NavEvent::Activate);
        assert!(matches!(nav.view, View::Page(_)));
        assert_eq!(nav.depth(), 1); // entering a page does not push
        nav.handle(&d, NavEvent::Back);
        assert_eq!(menu_cursor(&nav), 1);
    }

    #[test]
    fn test_page_field_edits() {
        let d = sample_doc();
        let mut nav = Nav::new(&d);
        nav.handle(&d, NavEvent::Activate); // into "sub"
        nav.handle(&d, NavEvent::Activate); // open "settings"

        // Toggle the checkbox.
        assert_eq!(nav.handle(&d, NavEvent::Activate), Effect::None);
        // Move to the second radio and select it.
        nav.handle(&d, NavEvent::Down);
        nav.handle(&d, NavEvent::Down);
        nav.handle(&d, NavEvent::Activate);
        // Textbox activation requests the line editor.
        nav.handle(&d, NavEvent::Down);
        assert_eq!(
            nav.handle(&d, NavEvent::Activate),
            Effect::EditLine { seed: "box".into() }
        );
        nav.apply_edit("edited".into());

        let View::Page(page) = &nav.view else { panic!("expected page view") };
        assert_eq!(
            page.fields[0],
            Field::Checkbox { key: "a".into(), title: "Alpha".into(), value: true }
        );
        assert_eq!(
            page.fields[1],
            Field::Radio { key: "b".into(), title: "Beta".into(), value: false }
        );
        assert_eq!(
            page.fields[2],
            Field::Radio { key: "c".into(), title: "Gamma".into(), value: true }
        );
        assert_eq!(
            page.fields[3],
            Field::TextBox { key: "name".into(), title: "Name".into(), value: "edited".into() }
        );
    }

    #[test]
    fn test_save_only_valid_on_pages() {
        let d = sample_doc();
        let mut nav = Nav::new(&d);
        assert_eq!(nav.handle(&d, NavEvent::Save), Effect::None);
        nav.handle(&d, NavEvent::Down);
        nav.handle(&d, NavEvent::Activate);
        assert_eq!(nav.handle(&d, NavEvent::Save), Effect::SavePage);
    }

    #[test]
    fn test_activate_on_empty_page_is_noop() {
        let d = sample_doc();
        let mut nav = Nav::new(&d);
        nav.handle(&d, NavEvent::Down);
        nav.handle(&d, NavEvent::Activate);
        assert_eq!(nav.handle(&d, NavEvent::Activate), Effect::None);
        assert_eq!(nav.handle(&d, NavEvent::Up), Effect::None);
        let View::Page(page) = &nav.view else { panic!("expected page view") };
        assert_eq!(page.cursor, 0);
    }

    #[test]
    fn test_unresolvable_entry_stays_in_place() {
        let d = doc(r#"
menu: root
title: Root
content:
  - page: real
    title: Real
    content: []
"#);
        let mut nav = Nav::new(&d);
        // Forge a dangling entry the way a hand-edited document would.
        if let View::Menu(m) = &mut nav.view {
            m.entries[0].id = "missing".into();
        }
        let effect = nav.handle(&d, NavEvent::Activate);
        assert!(matches!(effect, Effect::Popup(_)));
        assert!(matches!(nav.view, View::Menu(_)));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_run_commands_leaves_state_unchanged() {
        let d = sample_doc();
        let mut nav = Nav::new(&d);
        nav.handle(&d, NavEvent::Down);
        assert_eq!(nav.handle(&d, NavEvent::RunCommands), Effect::RunCommands);
        assert_eq!(menu_cursor(&nav), 1);
    }

    #[test]
    fn test_quit_terminates() {
        let d = sample_doc();
        let mut nav = Nav::new(&d);
        assert_eq!(nav.handle(&d, NavEvent::Quit), Effect::Quit);
        assert!(matches!(nav.view, View::Terminated));
    }
}
