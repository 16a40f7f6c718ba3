//! Line segment shape.

use super::{DrawSettings, ShapeTrait};
use crate::render::RenderSurface;
use kurbo::{BezPath, Line as KurboLine, Point, Rect, Shape as KurboShape};

/// A straight line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Start point.
    pub position: Point,
    /// End point.
    pub end_point: Point,
    /// Settings snapshot.
    pub settings: DrawSettings,
}

impl Line {
    /// Create a zero-length line.
    pub fn new(position: Point, settings: DrawSettings) -> Self {
        Self {
            position,
            end_point: position,
            settings,
        }
    }

    pub fn extend(&mut self, point: Point) {
        self.end_point = point;
    }

    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.position, self.end_point)
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        (self.end_point - self.position).hypot()
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.stroke(
            &self.to_path(),
            &self.settings.stroke(),
            self.settings.color(),
            peniko::Compose::SrcOver,
        );
    }
}

impl ShapeTrait for Line {
    fn anchor(&self) -> Point {
        self.position
    }

    fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.position, self.end_point)
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_extend() {
        let mut line = Line::new(Point::new(0.0, 0.0), DrawSettings::default());
        assert!(line.length().abs() < f64::EPSILON);

        line.extend(Point::new(30.0, 40.0));
        assert_eq!(line.end_point, Point::new(30.0, 40.0));
        assert!((line.length() - 50.0).abs() < f64::EPSILON);
    }
}
