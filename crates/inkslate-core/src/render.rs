//! Render target abstraction that shapes paint onto.

use kurbo::{BezPath, Point, Stroke};
use peniko::{Color, Compose};

/// A drawing surface shapes can paint themselves onto.
///
/// Backends decide how commands become pixels. Calls arrive in paint order,
/// and a later call occludes earlier ones; a stroke composited with
/// [`Compose::DestOut`] clears whatever was painted beneath it.
pub trait RenderSurface {
    /// Erase everything painted so far.
    fn clear(&mut self);

    /// Fill a closed path.
    fn fill(&mut self, path: &BezPath, color: Color);

    /// Stroke a path with the given compositing mode.
    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color, compose: Compose);

    /// Draw filled text with its baseline starting at `origin`.
    fn text(&mut self, content: &str, origin: Point, font: &str, color: Color);
}
