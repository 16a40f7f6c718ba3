//! Settings panel input, clamped before it reaches the canvas.

use inkslate_core::shapes::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DrawSettings};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted stroke widths in pixels.
pub const STROKE_WIDTH_RANGE: RangeInclusive<i64> = 1..=70;

/// Accepted font sizes in pixels.
pub const FONT_SIZE_RANGE: RangeInclusive<i64> = 6..=70;

/// Raw values from the settings controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsInput {
    pub color: String,
    pub filled: bool,
    pub stroke_width: i64,
    pub font_size: i64,
    pub font_family: String,
}

impl Default for SettingsInput {
    fn default() -> Self {
        Self::from_settings(&DrawSettings::default())
    }
}

fn clamp(value: i64, range: &RangeInclusive<i64>) -> i64 {
    value.clamp(*range.start(), *range.end())
}

impl SettingsInput {
    /// Read the controls back from a settings value.
    pub fn from_settings(settings: &DrawSettings) -> Self {
        Self {
            color: settings.color.clone(),
            filled: settings.filled,
            stroke_width: settings.stroke_width.round() as i64,
            font_size: settings
                .font_size()
                .map_or(i64::from(DEFAULT_FONT_SIZE), |size| size.round() as i64),
            font_family: settings.font_family().to_string(),
        }
    }

    pub fn clamped_stroke_width(&self) -> i64 {
        clamp(self.stroke_width, &STROKE_WIDTH_RANGE)
    }

    pub fn clamped_font_size(&self) -> i64 {
        clamp(self.font_size, &FONT_SIZE_RANGE)
    }

    /// Build the settings the canvas will snapshot from.
    pub fn to_settings(&self) -> DrawSettings {
        let family = match self.font_family.trim() {
            "" => DEFAULT_FONT_FAMILY,
            family => family,
        };
        let mut settings = DrawSettings {
            color: self.color.trim().to_string(),
            filled: self.filled,
            stroke_width: self.clamped_stroke_width() as f64,
            ..DrawSettings::default()
        };
        // Clamped into FONT_SIZE_RANGE, so the cast cannot truncate.
        settings.set_font(self.clamped_font_size() as u32, family);
        settings
    }
}
