//! Tool system for the drawing surface.

use crate::shapes::{DrawSettings, Line, Oval, Rectangle, Shape, Stroke, Text};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    Rectangle,
    Oval,
    Circle,
    Line,
    #[default]
    Freehand,
    Eraser,
    Text,
}

impl ToolKind {
    /// Get display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Oval => "Oval",
            ToolKind::Circle => "Circle",
            ToolKind::Line => "Line",
            ToolKind::Freehand => "Pen",
            ToolKind::Eraser => "Eraser",
            ToolKind::Text => "Text",
        }
    }

    /// Get all tools in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Freehand,
            ToolKind::Eraser,
            ToolKind::Line,
            ToolKind::Rectangle,
            ToolKind::Oval,
            ToolKind::Circle,
            ToolKind::Text,
        ]
    }

    /// Settings snapshot a new shape of this tool takes from the ambient settings.
    pub fn snapshot(self, ambient: &DrawSettings) -> DrawSettings {
        match self {
            ToolKind::Eraser => ambient.widened_for_eraser(),
            ToolKind::Text => ambient.for_text(),
            _ => ambient.clone(),
        }
    }

    /// Create the shape this tool draws, anchored at `at`.
    pub fn create_shape(self, at: Point, ambient: &DrawSettings) -> Shape {
        let settings = self.snapshot(ambient);
        match self {
            ToolKind::Rectangle => Shape::Rectangle(Rectangle::new(at, settings)),
            ToolKind::Oval => Shape::Oval(Oval::new(at, settings)),
            ToolKind::Circle => Shape::Circle(Oval::new(at, settings)),
            ToolKind::Line => Shape::Line(Line::new(at, settings)),
            ToolKind::Freehand => Shape::LineList(Stroke::new(at, settings)),
            ToolKind::Eraser => Shape::EraseList(Stroke::new(at, settings)),
            ToolKind::Text => Shape::DrawnText(Text::new(at, settings)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;

    #[test]
    fn test_tool_creates_matching_kind() {
        let settings = DrawSettings::default();
        let expected = [
            (ToolKind::Rectangle, ShapeKind::Rectangle),
            (ToolKind::Oval, ShapeKind::Oval),
            (ToolKind::Circle, ShapeKind::Circle),
            (ToolKind::Line, ShapeKind::Line),
            (ToolKind::Freehand, ShapeKind::LineList),
            (ToolKind::Eraser, ShapeKind::EraseList),
            (ToolKind::Text, ShapeKind::DrawnText),
        ];
        for (tool, kind) in expected {
            assert_eq!(tool.create_shape(Point::ZERO, &settings).kind(), kind);
        }
    }

    #[test]
    fn test_snapshots() {
        let ambient = DrawSettings {
            stroke_width: 10.0,
            filled: false,
            ..DrawSettings::default()
        };
        assert!((ToolKind::Eraser.snapshot(&ambient).stroke_width - 20.0).abs() < f64::EPSILON);
        assert!(ToolKind::Text.snapshot(&ambient).filled);
        assert_eq!(ToolKind::Line.snapshot(&ambient), ambient);
    }
}
