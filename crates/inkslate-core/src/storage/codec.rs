//! JSON drawing file codec.
//!
//! A drawing file is a JSON array with one record per shape. Each record
//! carries a `type` tag plus the fields of that variant:
//!
//! ```json
//! [{"type": "Rectangle", "position": {"x": 10.0, "y": 10.0},
//!   "settings": {"color": "#000000", "filled": false, "strokeWidth": 5.0, "fontSpec": "20px sans-serif"},
//!   "width": 40.0, "height": 30.0}]
//! ```
//!
//! Decoding rebuilds point sequences and text through the same `extend`
//! calls interactive drawing uses. Records that cannot be decoded are
//! skipped with a warning.

use crate::shapes::{
    DrawSettings, ExtendInput, Line, Oval, Rectangle, Shape, ShapeError, Stroke, Text,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Codec errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Drawing file must be a JSON array of shapes")]
    NotAnArray,
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RectangleRecord {
    position: Point,
    settings: DrawSettings,
    width: f64,
    height: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OvalRecord {
    position: Point,
    settings: DrawSettings,
    /// Written for readers of the file; recomputed from `second_point` on decode.
    #[serde(default)]
    x_radius: f64,
    #[serde(default)]
    y_radius: f64,
    second_point: Point,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineRecord {
    position: Point,
    settings: DrawSettings,
    end_point: Point,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StrokeRecord {
    position: Point,
    settings: DrawSettings,
    x_list: Vec<f64>,
    y_list: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextRecord {
    position: Point,
    settings: DrawSettings,
    chars: Vec<char>,
}

/// One record of a drawing file, tagged by `type`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum ShapeRecord {
    Rectangle(RectangleRecord),
    Oval(OvalRecord),
    Circle(OvalRecord),
    Line(LineRecord),
    LineList(StrokeRecord),
    EraseList(StrokeRecord),
    DrawnText(TextRecord),
}

impl ShapeRecord {
    fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Rectangle(r) => ShapeRecord::Rectangle(RectangleRecord {
                position: r.position,
                settings: r.settings.clone(),
                width: r.width,
                height: r.height,
            }),
            Shape::Oval(o) => ShapeRecord::Oval(OvalRecord::from_oval(o)),
            Shape::Circle(o) => ShapeRecord::Circle(OvalRecord::from_oval(o)),
            Shape::Line(l) => ShapeRecord::Line(LineRecord {
                position: l.position,
                settings: l.settings.clone(),
                end_point: l.end_point,
            }),
            Shape::LineList(s) => ShapeRecord::LineList(StrokeRecord::from_stroke(s)),
            Shape::EraseList(s) => ShapeRecord::EraseList(StrokeRecord::from_stroke(s)),
            Shape::DrawnText(t) => ShapeRecord::DrawnText(TextRecord {
                position: t.position,
                settings: t.settings.clone(),
                chars: t.chars().to_vec(),
            }),
        }
    }

    fn into_shape(self) -> Result<Shape, CodecError> {
        let shape = match self {
            ShapeRecord::Rectangle(r) => Shape::Rectangle(Rectangle::reconstruct(
                r.position, r.width, r.height, r.settings,
            )),
            ShapeRecord::Oval(o) => {
                let mut shape = Shape::Oval(Oval::new(o.position, o.settings));
                shape.extend(&ExtendInput::Point(o.second_point))?;
                shape
            }
            ShapeRecord::Circle(o) => {
                let mut shape = Shape::Circle(Oval::new(o.position, o.settings));
                shape.extend(&ExtendInput::Point(o.second_point))?;
                shape
            }
            ShapeRecord::Line(l) => {
                let mut shape = Shape::Line(Line::new(l.position, l.settings));
                shape.extend(&ExtendInput::Point(l.end_point))?;
                shape
            }
            ShapeRecord::LineList(s) => {
                let (position, settings, points) = s.into_parts()?;
                replay_points(Shape::LineList(Stroke::new(position, settings)), &points)?
            }
            ShapeRecord::EraseList(s) => {
                let (position, settings, points) = s.into_parts()?;
                replay_points(Shape::EraseList(Stroke::new(position, settings)), &points)?
            }
            ShapeRecord::DrawnText(t) => {
                let mut shape = Shape::DrawnText(Text::new(t.position, t.settings));
                for c in t.chars {
                    shape.extend(&ExtendInput::Key(c.to_string()))?;
                }
                shape
            }
        };
        Ok(shape)
    }
}

impl OvalRecord {
    fn from_oval(oval: &Oval) -> Self {
        Self {
            position: oval.position,
            settings: oval.settings.clone(),
            x_radius: oval.x_radius,
            y_radius: oval.y_radius,
            second_point: oval.second_point,
        }
    }
}

impl StrokeRecord {
    fn from_stroke(stroke: &Stroke) -> Self {
        Self {
            position: stroke.anchor(),
            settings: stroke.settings.clone(),
            x_list: stroke.x_list().to_vec(),
            y_list: stroke.y_list().to_vec(),
        }
    }

    /// Split into anchor, settings and the points appended after the anchor.
    ///
    /// The lists must start with `position`.
    fn into_parts(self) -> Result<(Point, DrawSettings, Vec<Point>), CodecError> {
        if self.x_list.len() != self.y_list.len() {
            return Err(CodecError::MalformedRecord(format!(
                "xList has {} entries but yList has {}",
                self.x_list.len(),
                self.y_list.len()
            )));
        }
        match (self.x_list.first(), self.y_list.first()) {
            (Some(&x), Some(&y)) if Point::new(x, y) == self.position => {}
            (Some(&x), Some(&y)) => {
                return Err(CodecError::MalformedRecord(format!(
                    "first point ({x}, {y}) does not match position ({}, {})",
                    self.position.x, self.position.y
                )));
            }
            _ => {
                return Err(CodecError::MalformedRecord(
                    "stroke has no points".to_string(),
                ));
            }
        }
        let points = self
            .x_list
            .iter()
            .zip(&self.y_list)
            .skip(1)
            .map(|(&x, &y)| Point::new(x, y))
            .collect();
        Ok((self.position, self.settings, points))
    }
}

fn replay_points(mut shape: Shape, points: &[Point]) -> Result<Shape, CodecError> {
    for &point in points {
        shape.extend(&ExtendInput::Point(point))?;
    }
    Ok(shape)
}

/// Encode shapes as a drawing file.
pub fn encode(shapes: &[Shape]) -> Result<Vec<u8>, CodecError> {
    let records: Vec<ShapeRecord> = shapes.iter().map(ShapeRecord::from_shape).collect();
    Ok(serde_json::to_vec_pretty(&records)?)
}

/// Decode a drawing file.
///
/// Fails only when the input is not a JSON array. Individual records with
/// an unknown `type` or broken fields are skipped.
pub fn decode(bytes: &[u8]) -> Result<Vec<Shape>, CodecError> {
    let Value::Array(records) = serde_json::from_slice::<Value>(bytes)? else {
        return Err(CodecError::NotAnArray);
    };

    let total = records.len();
    let mut shapes = Vec::with_capacity(total);
    for (index, value) in records.into_iter().enumerate() {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("<missing>")
            .to_string();
        let decoded = serde_json::from_value::<ShapeRecord>(value)
            .map_err(CodecError::from)
            .and_then(ShapeRecord::into_shape);
        match decoded {
            Ok(shape) => shapes.push(shape),
            Err(e) => log::warn!("Skipping record {} (type {}): {}", index, tag, e),
        }
    }

    if shapes.len() < total {
        log::info!("Decoded {} of {} records", shapes.len(), total);
    }
    Ok(shapes)
}
