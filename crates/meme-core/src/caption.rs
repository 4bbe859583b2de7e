//! Caption styling and placement

use crate::{BoxDimensions, Color, MemeError, Result};
use serde::{Deserialize, Serialize};

/// How captions are drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptionStyle {
    /// Font size in pixels
    pub font_size: f32,
    /// CSS font family (used by canvas surfaces; raster surfaces use their loaded font)
    pub font_family: String,
    /// Fill color
    pub fill: Color,
    /// Outline color, `None` for fill-only captions
    pub stroke: Option<Color>,
    /// Outline width in pixels
    pub stroke_width: f32,
    /// Distance from the top edge to the top caption's baseline
    pub top_offset: f64,
    /// Distance from the bottom edge to the bottom caption's baseline
    pub bottom_offset: f64,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size: 40.0,
            font_family: "Comic Sans MS".to_string(),
            fill: Color::white(),
            stroke: None,
            stroke_width: 2.0,
            top_offset: 50.0,
            bottom_offset: 30.0,
        }
    }
}

impl CaptionStyle {
    /// CSS `font` shorthand, e.g. "40px Comic Sans MS"
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }

    /// Classic white text with a black outline
    pub fn outlined(mut self) -> Self {
        self.stroke = Some(Color::black());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(MemeError::Config(format!(
                "font size must be positive: {}",
                self.font_size
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(MemeError::Config(format!(
                "stroke width must not be negative: {}",
                self.stroke_width
            )));
        }
        for (name, offset) in [
            ("top offset", self.top_offset),
            ("bottom offset", self.bottom_offset),
        ] {
            if !(offset.is_finite() && offset >= 0.0) {
                return Err(MemeError::Config(format!(
                    "{name} must not be negative: {offset}"
                )));
            }
        }
        Ok(())
    }
}

/// Point a caption is centered on, at its baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionAnchor {
    pub x: f64,
    pub baseline_y: f64,
}

/// Anchors for the top and bottom captions of a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionLayout {
    pub top: CaptionAnchor,
    pub bottom: CaptionAnchor,
}

impl CaptionLayout {
    pub fn for_surface(surface: BoxDimensions, style: &CaptionStyle) -> Self {
        let x = surface.width / 2.0;
        Self {
            top: CaptionAnchor {
                x,
                baseline_y: style.top_offset,
            },
            bottom: CaptionAnchor {
                x,
                baseline_y: surface.height - style.bottom_offset,
            },
        }
    }
}
