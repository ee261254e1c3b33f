//! End-to-end flows through the document model, navigation state
//! machine, and the sibling store, without a terminal.

use std::fs;
use std::path::PathBuf;

use serde_yaml::Value;

use yamlui::core::callbacks::CallbackRegistry;
use yamlui::core::document::Document;
use yamlui::core::nav::{Effect, Nav, NavEvent, View};
use yamlui::core::save::{self, SaveOutcome};

const DOC: &str = r#"
menu: root
title: System setup
content:
  - menu: network
    title: Network
    content:
      - page: iface
        title: Interface
        content:
          - checkbox: a
            title: Enable
          - radio: b
            title: DHCP
            value: true
          - radio: c
            title: Static
          - textbox: addr
            title: Address
            value: 10.0.0.1
  - page: motd
    title: Message of the day
    content:
      - textdisplay: banner
        title: Banner
        value: read only text
"#;

fn load_doc(dir: &tempfile::TempDir) -> Document {
    let path = dir.path().join("setup.yaml");
    fs::write(&path, DOC).unwrap();
    Document::load(&path).unwrap()
}

#[test]
fn test_toggle_fields_and_save_record() {
    let dir = tempfile::tempdir().unwrap();
    let doc = load_doc(&dir);
    let mut nav = Nav::new(&doc);

    nav.handle(&doc, NavEvent::Activate); // into Network
    nav.handle(&doc, NavEvent::Activate); // open Interface

    // Toggle the checkbox on, then select the second radio.
    nav.handle(&doc, NavEvent::Activate);
    nav.handle(&doc, NavEvent::Down);
    nav.handle(&doc, NavEvent::Down);
    nav.handle(&doc, NavEvent::Activate);

    let View::Page(page) = &nav.view else { panic!("expected page") };
    let registry = CallbackRegistry::new();
    let outcome = save::save_page(
        doc.path(),
        &page.id,
        page.on_save.as_deref(),
        &page.fields,
        &registry,
    )
    .unwrap();
    assert!(matches!(outcome, SaveOutcome::Saved { .. }));

    let store_path = dir.path().join("setup_data.yaml");
    let stored: Value = serde_yaml::from_str(&fs::read_to_string(&store_path).unwrap()).unwrap();
    let record = &stored["iface"];
    assert_eq!(record["a"], Value::Bool(true));
    assert_eq!(record["b"], Value::Bool(false));
    assert_eq!(record["c"], Value::Bool(true));
    assert_eq!(record["addr"], Value::from("10.0.0.1"));

    // The source document is never modified.
    assert_eq!(fs::read_to_string(dir.path().join("setup.yaml")).unwrap(), DOC);
}

#[test]
fn test_display_only_page_has_nothing_to_save() {
    let dir = tempfile::tempdir().unwrap();
    let doc = load_doc(&dir);
    let mut nav = Nav::new(&doc);

    nav.handle(&doc, NavEvent::Down);
    nav.handle(&doc, NavEvent::Activate); // open the MOTD page

    let View::Page(page) = &nav.view else { panic!("expected page") };
    let registry = CallbackRegistry::new();
    let outcome = save::save_page(
        doc.path(),
        &page.id,
        page.on_save.as_deref(),
        &page.fields,
        &registry,
    )
    .unwrap();
    assert_eq!(outcome, SaveOutcome::NothingToSave);
    assert!(!dir.path().join("setup_data.yaml").exists());
}

#[test]
fn test_save_callback_rewrites_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("with_hook.yaml");
    fs::write(
        &path,
        r#"
menu: root
title: Root
content:
  - page: host
    title: Host
    on_save: normalize
    content:
      - textbox: name
        title: Name
        value: "  Box1  "
"#,
    )
    .unwrap();
    let doc = Document::load(&path).unwrap();
    let mut nav = Nav::new(&doc);
    nav.handle(&doc, NavEvent::Activate);

    let mut registry = CallbackRegistry::new();
    registry.register(
        "normalize",
        Box::new(|record| {
            if let Some(Value::String(name)) = record.get_mut("name") {
                *name = name.trim().to_lowercase();
            }
            "normalized hostname".to_string()
        }),
    );

    let View::Page(page) = &nav.view else { panic!("expected page") };
    let outcome = save::save_page(
        doc.path(),
        &page.id,
        page.on_save.as_deref(),
        &page.fields,
        &registry,
    )
    .unwrap();
    assert_eq!(
        outcome,
        SaveOutcome::Saved { log: "normalized hostname".to_string() }
    );

    let stored: Value = serde_yaml::from_str(
        &fs::read_to_string(dir.path().join("with_hook_data.yaml")).unwrap(),
    )
    .unwrap();
    assert_eq!(stored["host"]["name"], Value::from("box1"));
}

#[test]
fn test_navigation_history_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let doc = load_doc(&dir);
    let mut nav = Nav::new(&doc);

    nav.handle(&doc, NavEvent::Activate); // into Network
    nav.handle(&doc, NavEvent::Activate); // open Interface
    nav.handle(&doc, NavEvent::Back); // back to Network
    nav.handle(&doc, NavEvent::Back); // back to root
    assert_eq!(nav.depth(), 1);
    // Backing out of the root changes nothing.
    assert_eq!(nav.handle(&doc, NavEvent::Back), Effect::None);
    assert_eq!(nav.depth(), 1);
    let View::Menu(menu) = &nav.view else { panic!("expected menu") };
    assert_eq!(menu.id, "root");
}

#[test]
fn test_store_path_stays_next_to_source() {
    let source = PathBuf::from("/etc/yamlui/setup.yml");
    let derived = save::derive_store_path(&source).unwrap();
    assert_eq!(derived, PathBuf::from("/etc/yamlui/setup_data.yml"));
}
