//! Layered scene building shared by the render backends.

use crate::renderer::{FrameStats, RenderContext, RenderResult, Renderer, RendererError};
use inkslate_core::render::RenderSurface;
use kurbo::{Affine, BezPath, Point, Rect, Shape, Stroke};
use peniko::{BlendMode, Color, Compose};

/// Scene commands a backend has to provide.
///
/// This is the subset of `vello::Scene` the canvas needs. Paths are in
/// canvas coordinates and `transform` maps them onto the target.
pub trait SceneSink {
    /// Drop everything recorded so far, including open layers.
    fn reset(&mut self);

    fn fill(&mut self, transform: Affine, path: &BezPath, color: Color);

    fn stroke(&mut self, transform: Affine, style: &Stroke, path: &BezPath, color: Color);

    /// Open a layer clipped to `clip`, composited with `blend` when popped.
    fn push_layer(&mut self, transform: Affine, blend: BlendMode, clip: Rect);

    fn pop_layer(&mut self);

    /// Draw text with its first baseline starting at `origin`.
    fn text(&mut self, transform: Affine, content: &str, origin: Point, font: &str, color: Color);
}

/// [`RenderSurface`] that paints onto a [`SceneSink`].
///
/// `clear` paints the background and opens a content layer above it, so an
/// erase stroke cuts through shapes but not the background. A stroke with a
/// compose mode other than `SrcOver` gets a layer of its own, blended with
/// that mode over everything painted before it.
pub struct LayeredSurface<S> {
    sink: S,
    transform: Affine,
    viewport: Rect,
    background: Color,
    content_open: bool,
    stats: FrameStats,
}

impl<S: SceneSink> LayeredSurface<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            transform: Affine::IDENTITY,
            viewport: Rect::ZERO,
            background: Color::WHITE,
            content_open: false,
            stats: FrameStats::default(),
        }
    }

    /// Frame geometry used from the next `clear` on. `viewport` is in
    /// canvas coordinates.
    pub fn configure(&mut self, viewport: Rect, transform: Affine, background: Color) {
        self.viewport = viewport;
        self.transform = transform;
        self.background = background;
    }

    /// Close the content layer and report what was painted since `clear`.
    pub fn finish(&mut self) -> FrameStats {
        if self.content_open {
            self.sink.pop_layer();
            self.content_open = false;
        }
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: SceneSink> RenderSurface for LayeredSurface<S> {
    fn clear(&mut self) {
        self.sink.reset();
        self.stats = FrameStats::default();
        self.sink
            .fill(self.transform, &self.viewport.to_path(0.1), self.background);
        self.sink
            .push_layer(self.transform, BlendMode::default(), self.viewport);
        self.content_open = true;
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.sink.fill(self.transform, path, color);
        self.stats.items += 1;
    }

    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color, compose: Compose) {
        if compose == Compose::SrcOver {
            self.sink.stroke(self.transform, style, path, color);
        } else {
            let half_width = style.width / 2.0;
            let clip = path.bounding_box().inflate(half_width, half_width);
            self.sink
                .push_layer(self.transform, BlendMode::from(compose), clip);
            self.sink.stroke(self.transform, style, path, color);
            self.sink.pop_layer();
        }
        if compose == Compose::DestOut {
            self.stats.erase_items += 1;
        }
        self.stats.items += 1;
    }

    fn text(&mut self, content: &str, origin: Point, font: &str, color: Color) {
        self.sink
            .text(self.transform, content, origin, font, color);
        self.stats.items += 1;
        self.stats.text_items += 1;
    }
}

/// Renderer that rebuilds a [`SceneSink`] from the canvas every frame.
pub struct SceneRenderer<S> {
    surface: LayeredSurface<S>,
}

impl<S: SceneSink> SceneRenderer<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            surface: LayeredSurface::new(sink),
        }
    }

    /// Backend holding the most recently built frame.
    pub fn sink(&self) -> &S {
        self.surface.sink()
    }

    pub fn into_sink(self) -> S {
        self.surface.into_sink()
    }
}

impl<S: SceneSink> Renderer for SceneRenderer<S> {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<FrameStats> {
        let size = ctx.viewport_size;
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(RendererError::Surface(format!(
                "Viewport must be non-empty, got {}x{}",
                size.width, size.height
            )));
        }
        if !(ctx.scale_factor.is_finite() && ctx.scale_factor > 0.0) {
            return Err(RendererError::RenderFailed(format!(
                "Invalid scale factor {}",
                ctx.scale_factor
            )));
        }

        let background = self.background_color(ctx);
        self.surface
            .configure(ctx.logical_size().to_rect(), ctx.transform(), background);
        ctx.canvas.redraw_all(&mut self.surface);

        let stats = self.surface.finish();
        log::debug!(
            "Built frame: {} items ({} erase, {} text)",
            stats.items,
            stats.erase_items,
            stats.text_items
        );
        Ok(stats)
    }
}
