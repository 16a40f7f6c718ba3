//! Vello-based renderer implementation.

use crate::scene::{SceneRenderer, SceneSink};
use inkslate_core::shapes::{DEFAULT_FONT_SIZE, font_spec_family, font_spec_size};
use kurbo::{Affine, BezPath, Point, Rect, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, FontStack, LayoutContext, StyleProperty};
use peniko::{BlendMode, Brush, Color, Fill};
use vello::Scene;

/// [`SceneSink`] that encodes into a `vello::Scene`.
pub struct VelloScene {
    scene: Scene,
    /// Font context for text rendering, reused across frames.
    font_cx: FontContext,
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloScene {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloScene {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// The encoded scene, ready to hand to a `vello::Renderer`.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl SceneSink for VelloScene {
    fn reset(&mut self) {
        self.scene.reset();
    }

    fn fill(&mut self, transform: Affine, path: &BezPath, color: Color) {
        self.scene.fill(Fill::NonZero, transform, color, None, path);
    }

    fn stroke(&mut self, transform: Affine, style: &Stroke, path: &BezPath, color: Color) {
        self.scene.stroke(style, transform, color, None, path);
    }

    fn push_layer(&mut self, transform: Affine, blend: BlendMode, clip: Rect) {
        self.scene.push_layer(blend, 1.0, transform, &clip);
    }

    fn pop_layer(&mut self) {
        self.scene.pop_layer();
    }

    fn text(&mut self, transform: Affine, content: &str, origin: Point, font: &str, color: Color) {
        let font_size = font_spec_size(font).unwrap_or(f64::from(DEFAULT_FONT_SIZE)) as f32;
        let brush = Brush::Solid(color);

        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, content, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontStack(FontStack::Source(
            font_spec_family(font).into(),
        )));
        let mut layout = builder.build(content);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        // Parley puts y=0 at the top of the layout; `origin` is on the first baseline.
        let first_baseline = layout
            .lines()
            .next()
            .map_or(0.0, |line| f64::from(line.metrics().baseline));
        let text_transform =
            transform * Affine::translate((origin.x, origin.y - first_baseline));

        let mut glyph_count = 0;
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();
                if glyphs.is_empty() {
                    continue;
                }
                glyph_count += glyphs.len();

                self.scene
                    .draw_glyphs(run.font())
                    .brush(&brush)
                    .hint(true)
                    .transform(text_transform)
                    .glyph_transform(glyph_xform)
                    .font_size(run.font_size())
                    .normalized_coords(run.normalized_coords())
                    .draw(Fill::NonZero, glyphs.into_iter());
            }
        }

        if glyph_count == 0 {
            log::warn!("No glyphs for {:?} in font {:?}", content, font);
        }
    }
}

/// Renderer that builds a `vello::Scene` per frame.
pub type VelloRenderer = SceneRenderer<VelloScene>;

impl SceneRenderer<VelloScene> {
    pub fn new() -> Self {
        Self::with_sink(VelloScene::new())
    }

    /// Scene of the most recently built frame.
    pub fn scene(&self) -> &Scene {
        self.sink().scene()
    }
}

impl Default for SceneRenderer<VelloScene> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{RenderContext, Renderer};
    use inkslate_core::Canvas;
    use inkslate_core::tools::ToolKind;
    use kurbo::Size;

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_encodes_shapes() {
        let mut renderer = VelloRenderer::new();
        let mut canvas = Canvas::new();
        canvas.begin_shape(ToolKind::Freehand, Point::new(10.0, 10.0));
        canvas.extend_current(Point::new(60.0, 40.0)).unwrap();
        canvas.commit_current();
        canvas.begin_shape(ToolKind::Eraser, Point::new(30.0, 0.0));
        canvas.extend_current(Point::new(30.0, 50.0)).unwrap();
        canvas.commit_current();

        let ctx = RenderContext::new(&canvas, Size::new(200.0, 100.0));
        let stats = renderer.build_scene(&ctx).unwrap();
        assert_eq!(stats.items, 2);
        assert_eq!(stats.erase_items, 1);
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_text_label_counts_as_text_item() {
        let mut renderer = VelloRenderer::new();
        let mut canvas = Canvas::new();
        canvas.begin_shape(ToolKind::Text, Point::new(5.0, 30.0));
        canvas.extend_current("o").unwrap();
        canvas.extend_current("k").unwrap();

        let ctx = RenderContext::new(&canvas, Size::new(200.0, 100.0));
        let stats = renderer.build_scene(&ctx).unwrap();
        assert_eq!(stats.text_items, 1);
    }
}
