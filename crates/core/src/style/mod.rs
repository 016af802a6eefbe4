//! Per-tag visual parameters. Passive data, no layout logic.

use serde::{Deserialize, Serialize};

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 1.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }
}

/// Scale and vertical margins resolved for one heading level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingStyle {
    pub scale: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

/// Visual parameters shared by every render call for a document.
///
/// Deserializes from partial JSON: missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub text_color: Rgb,
    pub link_color: Rgb,
    pub heading_color: Rgb,

    // Font scales relative to the base face
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub h4_size: f32,
    pub h5_size: f32,
    pub h6_size: f32,
    pub base_size: f32,
    pub small_size: f32,

    pub paragraph_spacing: f32,
    pub line_spacing: f32,
    pub indent_size: f32,

    pub h1_margin_top: f32,
    pub h1_margin_bottom: f32,
    pub h2_margin_top: f32,
    pub h2_margin_bottom: f32,
    pub h3_margin_top: f32,
    pub h3_margin_bottom: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text_color: Rgb::from_rgb8(255, 255, 255),
            link_color: Rgb::from_rgb8(100, 149, 237),
            heading_color: Rgb::from_rgb8(255, 255, 255),

            h1_size: 2.0,
            h2_size: 1.5,
            h3_size: 1.17,
            h4_size: 1.0,
            h5_size: 0.83,
            h6_size: 0.67,
            base_size: 1.0,
            small_size: 0.8,

            paragraph_spacing: 16.0,
            line_spacing: 1.4,
            indent_size: 20.0,

            h1_margin_top: 24.0,
            h1_margin_bottom: 16.0,
            h2_margin_top: 20.0,
            h2_margin_bottom: 12.0,
            h3_margin_top: 16.0,
            h3_margin_bottom: 8.0,
        }
    }
}

impl StyleConfig {
    /// Softer body text for dark window backgrounds.
    pub fn dark() -> Self {
        Self {
            text_color: Rgb::from_rgb8(240, 240, 240),
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON style file.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve heading level 1..=6. h4-h6 have no top margin and use
    /// paragraph spacing below; levels outside the range fall back to h6.
    pub fn heading(&self, level: u8) -> HeadingStyle {
        match level {
            1 => HeadingStyle {
                scale: self.h1_size,
                margin_top: self.h1_margin_top,
                margin_bottom: self.h1_margin_bottom,
            },
            2 => HeadingStyle {
                scale: self.h2_size,
                margin_top: self.h2_margin_top,
                margin_bottom: self.h2_margin_bottom,
            },
            3 => HeadingStyle {
                scale: self.h3_size,
                margin_top: self.h3_margin_top,
                margin_bottom: self.h3_margin_bottom,
            },
            4 => self.minor_heading(self.h4_size),
            5 => self.minor_heading(self.h5_size),
            _ => self.minor_heading(self.h6_size),
        }
    }

    fn minor_heading(&self, scale: f32) -> HeadingStyle {
        HeadingStyle {
            scale,
            margin_top: 0.0,
            margin_bottom: self.paragraph_spacing,
        }
    }
}
