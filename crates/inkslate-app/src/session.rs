//! Scripted input sessions.
//!
//! A session script is a JSON array of events, replayed through the same
//! [`EventHandler`] paths interactive input takes:
//!
//! ```json
//! [{"event": "selectTool", "tool": "Rectangle"},
//!  {"event": "pointerDown", "x": 10, "y": 10},
//!  {"event": "pointerMove", "x": 50, "y": 40},
//!  {"event": "pointerUp", "x": 50, "y": 40}]
//! ```

use crate::controls::SettingsInput;
use crate::error::AppResult;
use crate::event_handler::{EventHandler, KeyOutcome};
use inkslate_core::canvas::Canvas;
use inkslate_core::input::{Modifiers, MouseButton, PointerEvent};
use inkslate_core::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

fn left() -> MouseButton {
    MouseButton::Left
}

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    SelectTool {
        tool: ToolKind,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "left")]
        button: MouseButton,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default = "left")]
        button: MouseButton,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Settings {
        settings: SettingsInput,
    },
    ClearAll,
}

/// Counters collected while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub undos: usize,
    pub redos: usize,
}

/// Parse a session script.
pub fn parse_script(bytes: &[u8]) -> AppResult<Vec<SessionEvent>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Replay `events` onto `canvas`.
///
/// Stops at the first event the canvas rejects.
pub fn replay(
    events: &[SessionEvent],
    canvas: &mut Canvas,
    handler: &mut EventHandler,
) -> AppResult<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    for event in events {
        match event {
            SessionEvent::SelectTool { tool } => handler.select_tool(canvas, *tool),
            SessionEvent::PointerDown { x, y, button } => handler.handle_pointer(
                canvas,
                &PointerEvent::Down {
                    position: Point::new(*x, *y),
                    button: *button,
                },
            )?,
            SessionEvent::PointerMove { x, y } => handler.handle_pointer(
                canvas,
                &PointerEvent::Move {
                    position: Point::new(*x, *y),
                },
            )?,
            SessionEvent::PointerUp { x, y, button } => handler.handle_pointer(
                canvas,
                &PointerEvent::Up {
                    position: Point::new(*x, *y),
                    button: *button,
                },
            )?,
            SessionEvent::Key { key, modifiers } => {
                match handler.handle_key(canvas, key, *modifiers)? {
                    KeyOutcome::Undo { changed: true } => summary.undos += 1,
                    KeyOutcome::Redo { changed: true } => summary.redos += 1,
                    _ => {}
                }
            }
            SessionEvent::Settings { settings } => handler.apply_settings(canvas, settings),
            SessionEvent::ClearAll => canvas.clear_all(),
        }
        summary.events += 1;
    }
    Ok(summary)
}
