//! # Terminal Interface
//!
//! The only module that knows about ratatui and crossterm. It owns the
//! event loop: draw the active view, read one input event, translate it
//! into a [`NavEvent`], and interpret the resulting [`Effect`]. All
//! navigation and persistence decisions live in [`crate::core`].
//!
//! One overlay may be open at a time (popup, editor, or viewer). While
//! an overlay is open it consumes every event; popups are dismissed by
//! any key.

pub mod components;
pub mod event;

use std::io;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::core::callbacks::CallbackRegistry;
use crate::core::command::CommandRunner;
use crate::core::document::Document;
use crate::core::nav::{Effect, Nav, NavEvent, View};
use crate::core::save::{self, SaveOutcome};

use components::{Editor, EditorEvent, MenuBox, PageForm, Popup, ViewerState};
use event::TuiEvent;

/// Smallest terminal the layout engine is sized for.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// Refuse to start on terminals smaller than the layout minimum.
pub fn ensure_terminal_size() -> io::Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(io::Error::other(format!(
            "terminal is {width}x{height}, need at least {MIN_WIDTH}x{MIN_HEIGHT}"
        )));
    }
    Ok(())
}

/// The single overlay that may sit on top of the active view.
enum Overlay {
    Popup(String),
    Editor(Editor),
    Viewer(ViewerState),
}

/// Main event loop. Returns when the user quits.
pub fn run(
    terminal: &mut ratatui::DefaultTerminal,
    doc: &Document,
    registry: &CallbackRegistry,
    runner: &dyn CommandRunner,
) -> io::Result<()> {
    let mut nav = Nav::new(doc);
    let mut overlay: Option<Overlay> = None;

    loop {
        terminal.draw(|frame| draw_ui(frame, &nav, &mut overlay))?;

        let tui_event = event::read_event()?;
        match tui_event {
            TuiEvent::ForceQuit => return Ok(()),
            TuiEvent::Resize => continue,
            _ => {}
        }

        if let Some(active) = overlay.take() {
            match active {
                // Any key dismisses a popup.
                Overlay::Popup(_) => {}
                Overlay::Editor(mut editor) => match editor.handle_event(tui_event) {
                    Some(EditorEvent::Submit(text)) => nav.apply_edit(text),
                    Some(EditorEvent::Cancel) => {}
                    None => overlay = Some(Overlay::Editor(editor)),
                },
                Overlay::Viewer(mut viewer) => {
                    if !viewer.handle_event(tui_event) {
                        overlay = Some(Overlay::Viewer(viewer));
                    }
                }
            }
            continue;
        }

        let Some(nav_event) = map_nav_event(tui_event) else {
            continue;
        };
        match nav.handle(doc, nav_event) {
            Effect::None => {}
            Effect::EditLine { seed } => {
                overlay = Some(Overlay::Editor(Editor::line(active_field_title(&nav), seed)));
            }
            Effect::EditMultiline { seed } => {
                overlay = Some(Overlay::Editor(Editor::multiline(
                    active_field_title(&nav),
                    seed,
                )));
            }
            Effect::ViewText { title, content } => {
                overlay = Some(Overlay::Viewer(ViewerState::new(title, content)));
            }
            Effect::Popup(message) => overlay = Some(Overlay::Popup(message)),
            Effect::RunCommands => {
                let message = run_commands(terminal, doc, runner)?;
                overlay = Some(Overlay::Popup(message));
            }
            Effect::SavePage => {
                overlay = Some(Overlay::Popup(save_current_page(doc, &nav, registry)));
            }
            Effect::Quit => return Ok(()),
        }
    }
}

/// Translate a raw terminal event into the navigation vocabulary.
/// Returns None for keys that mean nothing outside an overlay.
fn map_nav_event(event: TuiEvent) -> Option<NavEvent> {
    match event {
        TuiEvent::Up => Some(NavEvent::Up),
        TuiEvent::Down => Some(NavEvent::Down),
        TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(NavEvent::Activate),
        TuiEvent::Escape => Some(NavEvent::Back),
        TuiEvent::InputChar('s' | 'S') => Some(NavEvent::Save),
        TuiEvent::InputChar('r' | 'R') => Some(NavEvent::RunCommands),
        TuiEvent::InputChar('q' | 'Q') => Some(NavEvent::Quit),
        _ => None,
    }
}

fn draw_ui(frame: &mut Frame, nav: &Nav, overlay: &mut Option<Overlay>) {
    match &nav.view {
        View::Menu(menu) => MenuBox::new(menu).render(frame),
        View::Page(page) => PageForm::new(&page.title, &page.fields, page.cursor).render(frame),
        View::Terminated => {}
    }
    draw_help_line(frame, &nav.view);

    if let Some(active) = overlay {
        match active {
            Overlay::Popup(message) => Popup::new(message).render(frame),
            Overlay::Editor(editor) => editor.render(frame),
            Overlay::Viewer(viewer) => viewer.render(frame),
        }
    }
}

/// Key hints on the bottom row, matching the active view.
fn draw_help_line(frame: &mut Frame, view: &View) {
    let hints = match view {
        View::Menu(_) => " Enter: select | Esc: back | r: run commands | q: quit ",
        View::Page(_) => " Enter/Space: edit | s: save | Esc: back | q: quit ",
        View::Terminated => return,
    };
    let area = frame.area();
    if area.height == 0 {
        return;
    }
    let row = Rect::new(0, area.height - 1, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(hints)).style(Style::default().fg(Color::DarkGray)),
        row,
    );
}

/// Suspend the TUI, run the document's commands in the configured
/// shell, then reclaim the terminal.
fn run_commands(
    terminal: &mut ratatui::DefaultTerminal,
    doc: &Document,
    runner: &dyn CommandRunner,
) -> io::Result<String> {
    let Some(commands) = doc.commands() else {
        return Ok("No commands defined".to_string());
    };

    ratatui::restore();
    let result = runner.run(&commands);
    *terminal = ratatui::init();
    terminal.clear()?;

    Ok(match result {
        Ok(()) => "Commands finished.".to_string(),
        Err(e) => format!("Command failed: {e}"),
    })
}

fn save_current_page(doc: &Document, nav: &Nav, registry: &CallbackRegistry) -> String {
    let View::Page(page) = &nav.view else {
        return String::new();
    };
    match save::save_page(
        doc.path(),
        &page.id,
        page.on_save.as_deref(),
        &page.fields,
        registry,
    ) {
        Ok(SaveOutcome::Saved { log }) if log.is_empty() => "Saved.".to_string(),
        Ok(SaveOutcome::Saved { log }) => format!("Saved. {log}"),
        Ok(SaveOutcome::NothingToSave) => "Nothing to save.".to_string(),
        Err(e) => format!("Save failed: {e}"),
    }
}

fn active_field_title(nav: &Nav) -> String {
    match &nav.view {
        View::Page(page) => page
            .fields
            .get(page.cursor)
            .map(|f| f.title().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}
