//! Generator configuration loaded from JSON

use crate::{CaptionStyle, Color, FitMode, MemeError, Result, Volume};
use serde::{Deserialize, Serialize};

/// Meme generator settings
///
/// Every field has a default, so `{}` is a valid configuration:
///
/// ```json
/// {
///   "canvasWidth": 400,
///   "canvasHeight": 400,
///   "background": "#000000",
///   "fitMode": "contain",
///   "caption": { "fontSize": 40, "fill": "#ffffff", "topOffset": 50, "bottomOffset": 30 },
///   "volume": 100
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemeConfig {
    /// Display surface width in pixels
    pub canvas_width: u32,
    /// Display surface height in pixels
    pub canvas_height: u32,
    /// Letterbox fill behind the image
    pub background: Color,
    pub fit_mode: FitMode,
    pub caption: CaptionStyle,
    /// Initial speech volume (0 - 100)
    pub volume: Volume,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 400,
            background: Color::black(),
            fit_mode: FitMode::Contain,
            caption: CaptionStyle::default(),
            volume: Volume::MAX,
        }
    }
}

impl MemeConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MemeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(MemeError::Config(format!(
                "canvas must not be empty: {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        self.caption.validate()?;
        if self.caption.top_offset > self.canvas_height as f64
            || self.caption.bottom_offset > self.canvas_height as f64
        {
            return Err(MemeError::Config(format!(
                "caption offsets must lie within the {}px canvas",
                self.canvas_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = MemeConfig::default();
        assert_eq!(config.canvas_width, 400);
        assert_eq!(config.canvas_height, 400);
        assert_eq!(config.background, Color::black());
        assert_eq!(config.fit_mode, FitMode::Contain);
        assert_eq!(config.volume.percent(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(MemeConfig::from_json("{}").unwrap(), MemeConfig::default());
    }

    #[test]
    fn test_from_json() {
        let config = MemeConfig::from_json(
            r##"{
                "canvasWidth": 800,
                "canvasHeight": 600,
                "background": "#202020",
                "fitMode": "cover",
                "caption": { "fontSize": 48, "stroke": "#000" },
                "volume": 40
            }"##,
        )
        .unwrap();

        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.background, Color::rgb(0x20, 0x20, 0x20));
        assert_eq!(config.fit_mode, FitMode::Cover);
        assert_eq!(config.caption.font_size, 48.0);
        assert_eq!(config.caption.stroke, Some(Color::black()));
        assert_eq!(config.caption.fill, Color::white());
        assert_eq!(config.volume.percent(), 40);
    }

    #[test]
    fn test_rejects_empty_canvas() {
        let err = MemeConfig::from_json(r#"{ "canvasWidth": 0 }"#).unwrap_err();
        assert!(matches!(err, MemeError::Config(_)));
    }

    #[test]
    fn test_rejects_offset_outside_canvas() {
        let err = MemeConfig::from_json(
            r#"{ "canvasHeight": 100, "caption": { "topOffset": 150 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, MemeError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_color_and_volume() {
        assert!(matches!(
            MemeConfig::from_json(r#"{ "background": "black" }"#),
            Err(MemeError::Json(_))
        ));
        assert!(matches!(
            MemeConfig::from_json(r#"{ "volume": 101 }"#),
            Err(MemeError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = MemeConfig::default();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"canvasWidth\": 400"));
        assert_eq!(MemeConfig::from_json(&json).unwrap(), config);
    }
}
