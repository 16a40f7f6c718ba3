//! Inkslate Application
//!
//! The application shell: input routing, settings controls, session replay
//! and the command line.

mod app;
mod controls;
mod error;
mod event_handler;
mod session;
mod shortcuts;

pub use app::{App, AppConfig, Cli, Command, ReplayReport, ShowReport, run};
pub use controls::{FONT_SIZE_RANGE, STROKE_WIDTH_RANGE, SettingsInput};
pub use error::{AppError, AppResult};
pub use event_handler::{EventHandler, KeyOutcome};
pub use session::{ReplaySummary, SessionEvent, parse_script, replay};
pub use shortcuts::{Shortcut, ShortcutRegistry};
