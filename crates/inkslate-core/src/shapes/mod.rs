//! Shape definitions for the drawing surface.

mod line;
mod oval;
mod rectangle;
mod stroke;
mod text;

pub use line::Line;
pub use oval::Oval;
pub use rectangle::Rectangle;
pub use stroke::{Stroke, smoothed_path};
pub use text::{BACKSPACE, Text};

use crate::render::RenderSurface;
use kurbo::{BezPath, Cap, Join, Point, Rect};
use peniko::{Color, Compose};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Extra width given to eraser strokes on top of the ambient stroke width.
pub const ERASER_WIDTH_OFFSET: f64 = 10.0;

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 20;

/// Default font family.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Drawing settings snapshot.
///
/// Shapes take their own copy when they are created; changing the ambient
/// settings afterwards never reaches an already placed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawSettings {
    /// Hex color string (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub color: String,
    /// Whether closed shapes are filled instead of outlined.
    pub filled: bool,
    /// Stroke width in pixels. Always positive.
    pub stroke_width: f64,
    /// CSS-style font description, `"<size>px <family>"`.
    pub font_spec: String,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            filled: false,
            stroke_width: 5.0,
            font_spec: format!("{}px {}", DEFAULT_FONT_SIZE, DEFAULT_FONT_FAMILY),
        }
    }
}

impl DrawSettings {
    /// Get the color as a peniko Color.
    pub fn color(&self) -> Color {
        parse_hex_color(&self.color).unwrap_or_else(|| {
            log::warn!("Unparseable color {:?}, falling back to black", self.color);
            Color::BLACK
        })
    }

    /// Stroke description used for outlines, lines and strokes.
    pub fn stroke(&self) -> kurbo::Stroke {
        kurbo::Stroke::new(self.stroke_width)
            .with_caps(Cap::Round)
            .with_join(Join::Round)
    }

    /// Copy used by the eraser tool: same settings, wider stroke.
    pub fn widened_for_eraser(&self) -> Self {
        Self {
            stroke_width: self.stroke_width + ERASER_WIDTH_OFFSET,
            ..self.clone()
        }
    }

    /// Copy used by the text tool. Text is always snapshotted as filled.
    pub fn for_text(&self) -> Self {
        Self {
            filled: true,
            ..self.clone()
        }
    }

    /// Set the font from a pixel size and a family name.
    pub fn set_font(&mut self, size: u32, family: &str) {
        self.font_spec = format!("{}px {}", size, family.trim());
    }

    /// Font size in pixels, if the font spec carries one.
    pub fn font_size(&self) -> Option<f64> {
        font_spec_size(&self.font_spec)
    }

    /// Font family part of the font spec.
    pub fn font_family(&self) -> &str {
        font_spec_family(&self.font_spec)
    }
}

/// Pixel size of a `"<size>px <family>"` font description.
pub fn font_spec_size(spec: &str) -> Option<f64> {
    let size = spec.split_whitespace().next()?;
    size.strip_suffix("px")?.parse().ok()
}

/// Family part of a `"<size>px <family>"` font description.
pub fn font_spec_family(spec: &str) -> &str {
    match spec.split_once(' ') {
        Some((size, family)) if size.ends_with("px") => family.trim(),
        _ => spec.trim(),
    }
}

/// Parse a hex color string (`#rgb`, `#rrggbb`, `#rrggbbaa`).
pub fn parse_hex_color(color: &str) -> Option<Color> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1])? * 17;
            let g = channel(&hex[1..2])? * 17;
            let b = channel(&hex[2..3])? * 17;
            Some(Color::from_rgba8(r, g, b, 255))
        }
        6 => Some(Color::from_rgba8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        )),
        8 => Some(Color::from_rgba8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

/// Variant tag of a shape, as written to drawing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Oval,
    Circle,
    Line,
    LineList,
    EraseList,
    DrawnText,
}

impl ShapeKind {
    /// Tag string used in the file format.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Oval => "Oval",
            ShapeKind::Circle => "Circle",
            ShapeKind::Line => "Line",
            ShapeKind::LineList => "LineList",
            ShapeKind::EraseList => "EraseList",
            ShapeKind::DrawnText => "DrawnText",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input fed to a shape while it is being drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtendInput {
    /// Pointer position.
    Point(Point),
    /// Key name, e.g. `"a"` or `"Backspace"`.
    Key(String),
}

impl ExtendInput {
    fn describe(&self) -> &'static str {
        match self {
            ExtendInput::Point(_) => "point",
            ExtendInput::Key(_) => "key",
        }
    }
}

impl From<Point> for ExtendInput {
    fn from(point: Point) -> Self {
        ExtendInput::Point(point)
    }
}

impl From<&str> for ExtendInput {
    fn from(key: &str) -> Self {
        ExtendInput::Key(key.to_string())
    }
}

/// Shape errors.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("{kind} cannot be extended with {input} input")]
    InputMismatch {
        kind: ShapeKind,
        input: &'static str,
    },
}

/// Common trait for all shape structs.
pub trait ShapeTrait {
    /// Primary reference point.
    fn anchor(&self) -> Point;

    /// Settings snapshot owned by the shape.
    fn settings(&self) -> &DrawSettings;

    /// Bounding box in screen coordinates.
    fn bounds(&self) -> Rect;

    /// Path geometry (empty for text).
    fn to_path(&self) -> BezPath;
}

/// Closed set of drawable shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Oval(Oval),
    Circle(Oval),
    Line(Line),
    LineList(Stroke),
    EraseList(Stroke),
    DrawnText(Text),
}

impl Shape {
    /// Get the variant tag.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Oval(_) => ShapeKind::Oval,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::LineList(_) => ShapeKind::LineList,
            Shape::EraseList(_) => ShapeKind::EraseList,
            Shape::DrawnText(_) => ShapeKind::DrawnText,
        }
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Oval(s) | Shape::Circle(s) => s,
            Shape::Line(s) => s,
            Shape::LineList(s) | Shape::EraseList(s) => s,
            Shape::DrawnText(s) => s,
        }
    }

    pub fn anchor(&self) -> Point {
        self.as_trait().anchor()
    }

    pub fn settings(&self) -> &DrawSettings {
        self.as_trait().settings()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    /// Paint the shape with its own settings snapshot.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        match self {
            Shape::Rectangle(s) => s.render(surface),
            Shape::Oval(s) | Shape::Circle(s) => s.render(surface),
            Shape::Line(s) => s.render(surface),
            Shape::LineList(s) => s.render(surface, Compose::SrcOver),
            Shape::EraseList(s) => s.render(surface, Compose::DestOut),
            Shape::DrawnText(s) => s.render(surface),
        }
    }

    /// Grow the shape from interactive input.
    pub fn extend(&mut self, input: &ExtendInput) -> Result<(), ShapeError> {
        let kind = self.kind();
        match (self, input) {
            (Shape::Rectangle(s), ExtendInput::Point(p)) => s.extend(*p),
            (Shape::Oval(s), ExtendInput::Point(p)) => s.extend(*p),
            (Shape::Circle(s), ExtendInput::Point(p)) => s.extend_circular(*p),
            (Shape::Line(s), ExtendInput::Point(p)) => s.extend(*p),
            (Shape::LineList(s) | Shape::EraseList(s), ExtendInput::Point(p)) => s.extend(*p),
            (Shape::DrawnText(s), ExtendInput::Key(key)) => s.extend(key),
            (_, input) => {
                return Err(ShapeError::InputMismatch {
                    kind,
                    input: input.describe(),
                });
            }
        }
        Ok(())
    }

    /// Get the text label if this shape is one.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::DrawnText(t) => Some(t),
            _ => None,
        }
    }

    /// Check if this shape is a text label.
    pub fn is_text(&self) -> bool {
        matches!(self, Shape::DrawnText(_))
    }
}

/// Bounding box of a set of points, `Rect::ZERO` when empty.
pub(crate) fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let red = parse_hex_color("#ff0000").unwrap().to_rgba8();
        assert_eq!((red.r, red.g, red.b, red.a), (255, 0, 0, 255));

        let short = parse_hex_color("#0f0").unwrap().to_rgba8();
        assert_eq!((short.r, short.g, short.b), (0, 255, 0));

        let alpha = parse_hex_color("#00000080").unwrap().to_rgba8();
        assert_eq!(alpha.a, 128);

        assert!(parse_hex_color("red").is_none());
        assert!(parse_hex_color("#12").is_none());
        assert!(parse_hex_color("#gggggg").is_none());
    }

    #[test]
    fn test_bad_color_falls_back_to_black() {
        let settings = DrawSettings {
            color: "nope".to_string(),
            ..DrawSettings::default()
        };
        let rgba = settings.color().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0, 0, 0, 255));
    }

    #[test]
    fn test_eraser_widening() {
        let settings = DrawSettings {
            stroke_width: 10.0,
            ..DrawSettings::default()
        };
        let eraser = settings.widened_for_eraser();
        assert!((eraser.stroke_width - 20.0).abs() < f64::EPSILON);
        assert!((settings.stroke_width - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_font_spec() {
        let mut settings = DrawSettings::default();
        settings.set_font(32, "Georgia");
        assert_eq!(settings.font_spec, "32px Georgia");
        assert_eq!(settings.font_size(), Some(32.0));
        assert_eq!(settings.font_family(), "Georgia");

        settings.font_spec = "serif".to_string();
        assert_eq!(settings.font_size(), None);
        assert_eq!(settings.font_family(), "serif");
    }

    #[test]
    fn test_extend_mismatch() {
        let mut rect = Shape::Rectangle(Rectangle::new(Point::ZERO, DrawSettings::default()));
        let err = rect.extend(&ExtendInput::from("a")).unwrap_err();
        assert_eq!(
            err,
            ShapeError::InputMismatch {
                kind: ShapeKind::Rectangle,
                input: "key",
            }
        );

        let mut text = Shape::DrawnText(Text::new(Point::ZERO, DrawSettings::default()));
        assert!(text.extend(&ExtendInput::Point(Point::new(1.0, 1.0))).is_err());
    }

    #[test]
    fn test_kind_is_stable() {
        let mut shape = Shape::Circle(Oval::new(Point::ZERO, DrawSettings::default()));
        shape.extend(&Point::new(10.0, 20.0).into()).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Circle);
        assert_eq!(shape.kind().to_string(), "Circle");
    }
}
