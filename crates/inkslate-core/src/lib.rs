//! Inkslate Core Library
//!
//! Shape model, drawing surface state and persistence for the Inkslate
//! drawing surface. Painting goes through [`RenderSurface`], so nothing here
//! depends on a particular graphics backend.

pub mod canvas;
pub mod history;
pub mod input;
pub mod render;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use canvas::Canvas;
pub use history::History;
pub use input::{HistoryCommand, InputState, Modifiers, MouseButton, PointerEvent};
pub use render::RenderSurface;
pub use shapes::{DrawSettings, ExtendInput, Shape, ShapeError, ShapeKind};
pub use storage::{CodecError, Storage, StorageError, StorageResult};
pub use tools::ToolKind;
