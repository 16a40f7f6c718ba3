//! Rectangle shape.

use super::{DrawSettings, ShapeTrait};
use crate::render::RenderSurface;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};

/// An axis-aligned rectangle anchored at one corner.
///
/// Width and height are signed, so the rectangle can grow from the anchor
/// in any of the four directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    /// Corner the rectangle was started from.
    pub position: Point,
    /// Signed width.
    pub width: f64,
    /// Signed height.
    pub height: f64,
    /// Settings snapshot.
    pub settings: DrawSettings,
}

impl Rectangle {
    /// Create an empty rectangle at a corner.
    pub fn new(position: Point, settings: DrawSettings) -> Self {
        Self {
            position,
            width: 0.0,
            height: 0.0,
            settings,
        }
    }

    /// Reconstruct a rectangle with a known size (for storage).
    pub(crate) fn reconstruct(
        position: Point,
        width: f64,
        height: f64,
        settings: DrawSettings,
    ) -> Self {
        Self {
            position,
            width,
            height,
            settings,
        }
    }

    /// Drag the opposite corner to `point`.
    pub fn extend(&mut self, point: Point) {
        let size = point - self.position;
        self.width = size.x;
        self.height = size.y;
    }

    /// Normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.position, self.position + Vec2::new(self.width, self.height))
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let path = self.to_path();
        let color = self.settings.color();
        if self.settings.filled {
            surface.fill(&path, color);
        } else {
            surface.stroke(&path, &self.settings.stroke(), color, peniko::Compose::SrcOver);
        }
    }
}

impl ShapeTrait for Rectangle {
    fn anchor(&self) -> Point {
        self.position
    }

    fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_sets_signed_size() {
        let mut rect = Rectangle::new(Point::new(10.0, 10.0), DrawSettings::default());
        rect.extend(Point::new(50.0, 40.0));
        assert!((rect.width - 40.0).abs() < f64::EPSILON);
        assert!((rect.height - 30.0).abs() < f64::EPSILON);

        rect.extend(Point::new(0.0, 5.0));
        assert!((rect.width + 10.0).abs() < f64::EPSILON);
        assert!((rect.height + 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_normalized() {
        let mut rect = Rectangle::new(Point::new(100.0, 100.0), DrawSettings::default());
        rect.extend(Point::new(50.0, 70.0));
        let bounds = rect.bounds();
        assert!((bounds.x0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 70.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }
}
