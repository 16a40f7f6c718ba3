//! Text label shape.

use super::{DEFAULT_FONT_SIZE, DrawSettings, ShapeTrait};
use crate::render::RenderSurface;
use kurbo::{BezPath, Point, Rect};

/// Key name that removes the last character.
pub const BACKSPACE: &str = "Backspace";

/// Average glyph advance relative to the font size, for approximate bounds.
const APPROX_ADVANCE: f64 = 0.6;

/// A single line of text typed at a baseline origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Baseline origin.
    pub position: Point,
    chars: Vec<char>,
    /// Settings snapshot.
    pub settings: DrawSettings,
}

impl Text {
    /// Create an empty label.
    pub fn new(position: Point, settings: DrawSettings) -> Self {
        Self {
            position,
            chars: Vec::new(),
            settings,
        }
    }

    /// Apply a key: `Backspace` removes the last character, a single
    /// printable character is appended, anything else is ignored.
    pub fn extend(&mut self, key: &str) {
        if key == BACKSPACE {
            self.chars.pop();
            return;
        }
        let mut iter = key.chars();
        if let (Some(c), None) = (iter.next(), iter.next()) {
            if !c.is_control() {
                self.chars.push(c);
            }
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Text content as a string.
    pub fn content(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn font_size(&self) -> f64 {
        self.settings
            .font_size()
            .unwrap_or(f64::from(DEFAULT_FONT_SIZE))
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        if self.chars.is_empty() {
            return;
        }
        surface.text(
            &self.content(),
            self.position,
            &self.settings.font_spec,
            self.settings.color(),
        );
    }
}

impl ShapeTrait for Text {
    fn anchor(&self) -> Point {
        self.position
    }

    fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    /// Approximate bounds: one line above the baseline.
    fn bounds(&self) -> Rect {
        let size = self.font_size();
        let width = self.chars.len() as f64 * size * APPROX_ADVANCE;
        Rect::new(
            self.position.x,
            self.position.y - size,
            self.position.x + width,
            self.position.y,
        )
    }

    fn to_path(&self) -> BezPath {
        BezPath::new()
    }
}
