use crate::core::input::Key;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton};
use std::io;
use std::time::Duration;

/// Editor events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    Key(Key),
    /// Left button press at a screen cell
    Click { column: u16, row: u16 },
    Resize(u16, u16),
    None,
}

#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Check for available events with a timeout
    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    /// Read the next event (call after `poll` returned true)
    pub fn read(&mut self) -> io::Result<EditorEvent> {
        Ok(translate(event::read()?))
    }
}

/// Map a crossterm event to an editor event
pub fn translate(event: Event) -> EditorEvent {
    match event {
        Event::Key(key_event) => {
            key_from_event(key_event).map_or(EditorEvent::None, EditorEvent::Key)
        }
        Event::Resize(cols, rows) => EditorEvent::Resize(cols, rows),
        Event::Mouse(mouse) => match mouse.kind {
            event::MouseEventKind::Down(MouseButton::Left) => EditorEvent::Click {
                column: mouse.column,
                row: mouse.row,
            },
            _ => EditorEvent::None,
        },
        _ => EditorEvent::None,
    }
}

/// Normalize a crossterm key event; release events yield `None`
pub fn key_from_event(key_event: KeyEvent) -> Option<Key> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    let key = match key_event.code {
        KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Esc,
        _ => Key::Null,
    };
    Some(key)
}
