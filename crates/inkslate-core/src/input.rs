//! Input state management for pointer and keyboard events.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Key name that commits a text label being composed.
pub const ENTER: &str = "Enter";

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl, or Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => *position,
        }
    }
}

/// History command bound to a key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommand {
    Undo,
    Redo,
}

/// Resolve the undo/redo chord for a pressed key.
///
/// Ctrl+Z undoes; Ctrl+Shift+Z and Ctrl+Y redo. Returns `None` while a text
/// label is being composed, so the keystroke reaches the text instead.
pub fn history_shortcut(
    key: &str,
    modifiers: Modifiers,
    composing_text: bool,
) -> Option<HistoryCommand> {
    if composing_text || !modifiers.command() {
        return None;
    }
    match key.to_ascii_lowercase().as_str() {
        "z" if modifiers.shift => Some(HistoryCommand::Redo),
        "z" => Some(HistoryCommand::Undo),
        "y" => Some(HistoryCommand::Redo),
        _ => None,
    }
}

/// Tracks the pointer state between events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.pointer_position = event.position();
        match *event {
            PointerEvent::Down { button, .. } => {
                self.pressed_buttons.insert(button);
            }
            PointerEvent::Up { button, .. } => {
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { .. } => {}
        }
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Whether the left button is held down.
    pub fn is_dragging(&self) -> bool {
        self.is_button_pressed(MouseButton::Left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::default()
        }
    }

    #[test]
    fn test_button_press_and_release() {
        let mut input = InputState::new();

        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(input.is_button_pressed(MouseButton::Left));
        assert!(!input.is_button_pressed(MouseButton::Right));
        assert!(input.is_dragging());

        input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(120.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(!input.is_button_pressed(MouseButton::Left));
        assert!(!input.is_dragging());
        assert_eq!(input.pointer_position, Point::new(120.0, 100.0));
    }

    #[test]
    fn test_only_left_button_drags() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Right,
        });
        assert!(!input.is_dragging());

        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(12.0, 10.0),
            button: MouseButton::Right,
        });
        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(50.0, 20.0),
        });
        assert!(input.is_dragging());
        assert_eq!(input.pointer_position, Point::new(50.0, 20.0));
    }

    #[test]
    fn test_history_shortcuts() {
        let ctrl_shift = Modifiers {
            shift: true,
            ..ctrl()
        };
        assert_eq!(history_shortcut("z", ctrl(), false), Some(HistoryCommand::Undo));
        assert_eq!(history_shortcut("Z", ctrl_shift, false), Some(HistoryCommand::Redo));
        assert_eq!(history_shortcut("y", ctrl(), false), Some(HistoryCommand::Redo));
        assert_eq!(history_shortcut("z", Modifiers::default(), false), None);
        assert_eq!(history_shortcut("x", ctrl(), false), None);
    }

    #[test]
    fn test_history_shortcuts_suppressed_while_composing() {
        assert_eq!(history_shortcut("z", ctrl(), true), None);
        assert_eq!(history_shortcut("y", ctrl(), true), None);
    }

    #[test]
    fn test_meta_counts_as_command() {
        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert_eq!(history_shortcut("z", meta, false), Some(HistoryCommand::Undo));
    }
}
