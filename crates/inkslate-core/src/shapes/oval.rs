//! Oval shape, shared by the oval and circle tools.

use super::{DrawSettings, ShapeTrait};
use crate::render::RenderSurface;
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Size};

/// An ellipse spanned between two opposite corners.
///
/// The center is never stored: it is always the midpoint of `position`
/// and `second_point`.
#[derive(Debug, Clone, PartialEq)]
pub struct Oval {
    /// Corner the oval was started from.
    pub position: Point,
    /// Opposite corner of the bounding box.
    pub second_point: Point,
    /// Horizontal radius.
    pub x_radius: f64,
    /// Vertical radius.
    pub y_radius: f64,
    /// Settings snapshot.
    pub settings: DrawSettings,
}

impl Oval {
    /// Create a degenerate oval at a corner.
    pub fn new(position: Point, settings: DrawSettings) -> Self {
        Self {
            position,
            second_point: position,
            x_radius: 0.0,
            y_radius: 0.0,
            settings,
        }
    }

    /// Move the opposite corner; radii follow the per-axis distance.
    pub fn extend(&mut self, point: Point) {
        let (rx, ry) = half_extents(self.position, point);
        self.second_point = point;
        self.x_radius = rx;
        self.y_radius = ry;
    }

    /// Move the opposite corner, keeping both radii equal to the larger one.
    pub fn extend_circular(&mut self, point: Point) {
        let (rx, ry) = half_extents(self.position, point);
        let radius = rx.max(ry);
        self.second_point = point;
        self.x_radius = radius;
        self.y_radius = radius;
    }

    pub fn center(&self) -> Point {
        self.position.midpoint(self.second_point)
    }

    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center(), (self.x_radius, self.y_radius), 0.0)
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

fn half_extents(a: Point, b: Point) -> (f64, f64) {
    ((b.x - a.x).abs() / 2.0, (b.y - a.y).abs() / 2.0)
}

impl ShapeTrait for Oval {
    fn anchor(&self) -> Point {
        self.position
    }

    fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(
            self.center(),
            Size::new(self.x_radius * 2.0, self.y_radius * 2.0),
        )
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }
}
