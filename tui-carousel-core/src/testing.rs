//! Test utilities for carousel components
//!
//! - [`key`], [`char_key`], [`click`]: build input events
//! - [`RenderHarness`]: render into an in-memory terminal and read it back as text
//! - [`TestHarness`]: capture emitted actions through a channel
//! - [`NavigationRecorder`]: record every state a navigation listener receives
//! - `assert_emitted!` and friends for checking emitted actions
//!
//! # Example
//!
//! ```ignore
//! use tui_carousel::testing::{key, RenderHarness};
//!
//! let mut render = RenderHarness::new(120, 20);
//! let output = render.render_to_string_plain(|frame| {
//!     view.render(frame, frame.area(), props);
//! });
//! assert!(output.contains("Slide 1"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};
use tokio::sync::mpsc;

use crate::adapter::NavigationState;
use crate::event::EventKind;
use crate::Action;

/// Parse a key description such as `"left"`, `"l"`, `"3"` or `"ctrl+c"`.
///
/// Returns `None` for empty or unknown names.
pub fn parse_key(s: &str) -> Option<KeyEvent> {
    let s = s.trim().to_lowercase();
    let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
    let name = parts.pop().filter(|p| !p.is_empty())?;

    let mut modifiers = KeyModifiers::empty();
    for part in parts {
        match part {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match name {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Create a key event from a key string, wrapped as an [`EventKind`].
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> EventKind {
    EventKind::Key(parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s)))
}

/// Key event for a character with no modifiers.
pub fn char_key(c: char) -> EventKind {
    EventKind::Key(KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Left-button press at a terminal cell.
pub fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Render closures into an in-memory terminal.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test backend cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {e}"));
        Self { terminal }
    }

    /// Render one frame and return the resulting buffer.
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal
            .draw(draw)
            .unwrap_or_else(|e| panic!("test render failed: {e}"));
        self.terminal.backend().buffer()
    }

    /// Render one frame and return its text, one line per row, styles dropped.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Text content of a buffer, one line per row with trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collects every [`NavigationState`] handed to a listener.
#[derive(Debug, Clone, Default)]
pub struct NavigationRecorder {
    states: Rc<RefCell<Vec<NavigationState>>>,
}

impl NavigationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that appends to this recorder.
    pub fn listener(&self) -> impl FnMut(&NavigationState) + 'static {
        let states = self.states.clone();
        move |nav: &NavigationState| states.borrow_mut().push(nav.clone())
    }

    pub fn states(&self) -> Vec<NavigationState> {
        self.states.borrow().clone()
    }

    pub fn last(&self) -> Option<NavigationState> {
        self.states.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.states.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.borrow().is_empty()
    }
}

/// Holds state under test plus a channel that captures emitted actions.
///
/// # Example
///
/// ```ignore
/// let mut harness = TestHarness::<(), PageAction>::new(());
/// let tx = harness.sender();
/// container.set_lifted_handler(move |nav| { let _ = tx.send(PageAction::Nav(nav.clone())); });
/// container.next();
/// assert_eq!(harness.drain_emitted().len(), 1);
/// ```
pub struct TestHarness<S, A: Action> {
    /// The application state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Sender to hand to listeners and handlers.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action (simulates what a handler would do).
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Emit every action a component returned from `handle_event`.
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Assert that an action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
