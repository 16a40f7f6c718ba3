//! Freehand point-sequence shape, used for both pen and eraser strokes.

use super::{DrawSettings, ShapeTrait, points_bounds};
use crate::render::RenderSurface;
use kurbo::{BezPath, Point, Rect};
use peniko::Compose;

/// A freehand stroke.
///
/// The x and y coordinates are kept in two synchronized sequences, seeded
/// with the anchor and only ever appended to.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    position: Point,
    x_list: Vec<f64>,
    y_list: Vec<f64>,
    /// Settings snapshot.
    pub settings: DrawSettings,
}

impl Stroke {
    /// Start a stroke at `position`.
    pub fn new(position: Point, settings: DrawSettings) -> Self {
        Self {
            position,
            x_list: vec![position.x],
            y_list: vec![position.y],
            settings,
        }
    }

    /// First point of the stroke. Always equal to the first entry of both
    /// coordinate lists.
    pub fn anchor(&self) -> Point {
        self.position
    }

    /// Append a point.
    pub fn extend(&mut self, point: Point) {
        self.x_list.push(point.x);
        self.y_list.push(point.y);
    }

    pub fn x_list(&self) -> &[f64] {
        &self.x_list
    }

    pub fn y_list(&self) -> &[f64] {
        &self.y_list
    }

    /// Points in drawing order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x_list
            .iter()
            .zip(&self.y_list)
            .map(|(&x, &y)| Point::new(x, y))
    }

    pub fn len(&self) -> usize {
        self.x_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_list.is_empty()
    }

    /// Paint the smoothed stroke with the given compositing mode.
    pub fn render(&self, surface: &mut dyn RenderSurface, compose: Compose) {
        surface.stroke(
            &self.to_path(),
            &self.settings.stroke(),
            self.settings.color(),
            compose,
        );
    }
}

/// Build the smoothed path through `points`.
///
/// Each interior point is the control point of a quadratic segment ending
/// at the midpoint to the next point; the last segment is a straight line
/// to the final point.
pub fn smoothed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };

    path.move_to(first);
    let Some((&last, interior)) = rest.split_last() else {
        // Single point: zero-length segment so round caps leave a dot.
        path.line_to(first);
        return path;
    };

    for (i, &control) in interior.iter().enumerate() {
        let next = rest[i + 1];
        path.quad_to(control, control.midpoint(next));
    }
    path.line_to(last);
    path
}

impl ShapeTrait for Stroke {
    fn anchor(&self) -> Point {
        self.position
    }

    fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    fn bounds(&self) -> Rect {
        let points: Vec<Point> = self.points().collect();
        points_bounds(&points)
    }

    fn to_path(&self) -> BezPath {
        let points: Vec<Point> = self.points().collect();
        smoothed_path(&points)
    }
}
