//! Input events delivered to components

use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// The actual event payload
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize, in columns and rows
    Resize(u16, u16),
}

impl EventKind {
    /// The key, if this is a press or an auto-repeat.
    ///
    /// Terminals with enhanced keyboard reporting also deliver releases;
    /// navigation must not react to those or one press would move twice.
    pub fn pressed_key(&self) -> Option<&KeyEvent> {
        match self {
            EventKind::Key(key) if key.kind != KeyEventKind::Release => Some(key),
            _ => None,
        }
    }

    /// Position of a left-button press, if this is one
    pub fn click_position(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some((*column, *row)),
            _ => None,
        }
    }
}
