//! Event handling for tool interactions.

use crate::controls::SettingsInput;
use crate::error::AppResult;
use inkslate_core::canvas::Canvas;
use inkslate_core::input::{
    ENTER, HistoryCommand, InputState, Modifiers, MouseButton, PointerEvent,
    history_shortcut,
};
use inkslate_core::tools::ToolKind;

/// What a key press ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Undo { changed: bool },
    Redo { changed: bool },
    TextCommitted,
    TextEdited,
    Ignored,
}

/// Handles high-level events and translates them to canvas operations.
#[derive(Debug, Default)]
pub struct EventHandler {
    input: InputState,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a pointer event.
    ///
    /// Left press starts a shape with the active tool, dragging grows it and
    /// release commits it. A text label ignores pointer motion and stays open
    /// until Enter or a tool switch.
    pub fn handle_pointer(&mut self, canvas: &mut Canvas, event: &PointerEvent) -> AppResult<()> {
        let was_dragging = self.input.is_dragging();
        self.input.handle_pointer_event(event);

        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                canvas.begin_shape(canvas.active_tool(), position);
            }
            PointerEvent::Move { .. } => {
                if was_dragging && !canvas.is_composing_text() {
                    canvas.extend_current(self.input.pointer_position)?;
                }
            }
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => {
                if was_dragging {
                    canvas.commit_current();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Route a key press.
    ///
    /// Undo and redo chords apply whatever tool is active, except while a
    /// text label is being composed; then every key goes to the label.
    pub fn handle_key(
        &mut self,
        canvas: &mut Canvas,
        key: &str,
        modifiers: Modifiers,
    ) -> AppResult<KeyOutcome> {
        let outcome = match history_shortcut(key, modifiers, canvas.is_composing_text()) {
            Some(HistoryCommand::Undo) => KeyOutcome::Undo {
                changed: canvas.undo(),
            },
            Some(HistoryCommand::Redo) => KeyOutcome::Redo {
                changed: canvas.redo(),
            },
            None if canvas.is_composing_text() => {
                if key == ENTER {
                    canvas.commit_text();
                    KeyOutcome::TextCommitted
                } else {
                    canvas.extend_current(key)?;
                    KeyOutcome::TextEdited
                }
            }
            None => KeyOutcome::Ignored,
        };
        Ok(outcome)
    }

    /// Toolbar selection.
    pub fn select_tool(&mut self, canvas: &mut Canvas, tool: ToolKind) {
        canvas.select_tool(tool);
    }

    /// Settings panel change. Applies to shapes created from now on.
    pub fn apply_settings(&mut self, canvas: &mut Canvas, input: &SettingsInput) {
        canvas.settings = input.to_settings();
        log::debug!("Ambient settings now {:?}", canvas.settings);
    }
}
