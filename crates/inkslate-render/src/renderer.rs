//! Renderer trait abstraction.

use inkslate_core::canvas::Canvas;
use kurbo::{Affine, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::WHITE,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Transform from canvas coordinates to physical pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor)
    }

    /// Viewport size in logical pixels.
    pub fn logical_size(&self) -> Size {
        if self.scale_factor > 0.0 {
            Size::new(
                self.viewport_size.width / self.scale_factor,
                self.viewport_size.height / self.scale_factor,
            )
        } else {
            self.viewport_size
        }
    }
}

/// Summary of one built frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Paint commands issued, including erase strokes.
    pub items: usize,
    /// Strokes composited as cut-outs.
    pub erase_items: usize,
    /// Text runs drawn.
    pub text_items: usize,
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the draw commands for a frame.
    ///
    /// Called whenever the canvas reports a pending redraw. Every call starts
    /// from a cleared target, so repeated calls with an unchanged canvas
    /// produce the same frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<FrameStats>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builders() {
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0))
            .with_scale_factor(2.0)
            .with_background(Color::BLACK);

        assert!((ctx.scale_factor - 2.0).abs() < f64::EPSILON);
        assert_eq!(ctx.background_color.to_rgba8(), Color::BLACK.to_rgba8());
        let logical = ctx.logical_size();
        assert!((logical.width - 400.0).abs() < f64::EPSILON);
        assert!((logical.height - 300.0).abs() < f64::EPSILON);
        assert_eq!(ctx.transform(), Affine::scale(2.0));
    }
}
