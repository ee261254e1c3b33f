//! Terminal input events.
//!
//! Translates crossterm key events into the flat `TuiEvent` vocabulary.
//! How an event is interpreted depends on what is active: the main loop
//! maps browse keys onto `core::nav::NavEvent`, while overlays (editors,
//! viewer, popup) consume the editing events directly.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// TUI-specific input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Up,
    Down,
    PageUp,
    PageDown,
    /// Enter. Activation while browsing, submit/newline in editors.
    Submit,
    Escape,
    InputChar(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Ctrl+D finishes the multiline editor.
    EndOfInput,
    /// Ctrl+C always quits regardless of what is active.
    ForceQuit,
    /// Terminal resize; triggers a redraw only.
    Resize,
}

/// Block until the next mappable event arrives.
pub fn read_event() -> std::io::Result<TuiEvent> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if let Some(mapped) = map_key(key.modifiers, key.code) {
                    log::debug!("key event: {:?} with modifiers {:?}", key.code, key.modifiers);
                    return Ok(mapped);
                }
            }
            Event::Resize(_, _) => return Ok(TuiEvent::Resize),
            _ => {}
        }
    }
}

fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => Some(TuiEvent::EndOfInput),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Up) => Some(TuiEvent::Up),
        (_, KeyCode::Down) => Some(TuiEvent::Down),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_is_force_quit() {
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(TuiEvent::ForceQuit)
        );
    }

    #[test]
    fn test_plain_chars_pass_through() {
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::Char('q')),
            Some(TuiEvent::InputChar('q'))
        );
    }

    #[test]
    fn test_unmapped_keys_yield_none() {
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::F(5)), None);
    }
}
