use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::core::action::{Action, PointerKind};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Resize(u16, u16),
    Pointer(PointerKind, u16, u16),
}

impl TuiEvent {
    pub fn into_action(self) -> Action {
        match self {
            TuiEvent::Quit => Action::Quit,
            TuiEvent::Resize(columns, rows) => Action::Resized { columns, rows },
            TuiEvent::Pointer(kind, x, y) => Action::Pointer { kind, x, y },
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, waiting at most `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(event) => translate(event),
            Err(e) => {
                log::warn!("Failed to read terminal event: {}", e);
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            log::warn!("Failed to poll terminal events: {}", e);
            None
        }
    }
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => translate_mouse(mouse_event),
        Event::Resize(columns, rows) => Some(TuiEvent::Resize(columns, rows)),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        _ => None,
    }
}

fn translate_mouse(mouse_event: MouseEvent) -> Option<TuiEvent> {
    let kind = match mouse_event.kind {
        MouseEventKind::Down(_) => PointerKind::Press,
        MouseEventKind::Up(_) => PointerKind::Release,
        MouseEventKind::Drag(_) => PointerKind::Drag,
        MouseEventKind::Moved => PointerKind::Move,
        _ => return None,
    };
    Some(TuiEvent::Pointer(kind, mouse_event.column, mouse_event.row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseButton;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(translate(event), Some(TuiEvent::Quit));
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(translate(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(translate(key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(release)), None);
    }

    #[test]
    fn test_mouse_release_becomes_pointer_release() {
        let event = mouse(MouseEventKind::Up(MouseButton::Left), 45, 35);
        assert_eq!(
            translate(event).map(TuiEvent::into_action),
            Some(Action::Pointer {
                kind: PointerKind::Release,
                x: 45,
                y: 35
            })
        );
    }

    #[test]
    fn test_mouse_kinds() {
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 1, 2);
        assert_eq!(translate(down), Some(TuiEvent::Pointer(PointerKind::Press, 1, 2)));
        let moved = mouse(MouseEventKind::Moved, 1, 2);
        assert_eq!(translate(moved), Some(TuiEvent::Pointer(PointerKind::Move, 1, 2)));
        assert_eq!(translate(mouse(MouseEventKind::ScrollUp, 1, 2)), None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            translate(Event::Resize(80, 24)).map(TuiEvent::into_action),
            Some(Action::Resized {
                columns: 80,
                rows: 24
            })
        );
    }
}
