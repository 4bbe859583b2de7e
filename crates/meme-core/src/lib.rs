//! Meme Core - letterbox fitting and meme composition
//!
//! This crate provides functionality for:
//! - Fitting an image into a display surface while preserving aspect ratio
//! - Laying out top/bottom captions
//! - Driving a display surface and a speech synthesizer from UI events
//! - Rendering memes to an in-memory RGBA canvas (JPEG, PNG, GIF, WebP, BMP input)
//!
//! # Example
//!
//! ```ignore
//! use meme_core::{compute_fit, load_asset, MemeConfig, MemeGenerator, RasterSurface};
//!
//! let placement = compute_fit(400.0, 400.0, 100.0, 200.0)?;
//! assert_eq!(placement.start_x, 100.0);
//!
//! let config = MemeConfig::default();
//! let surface = RasterSurface::new(400, 400)?.with_font(std::fs::read("impact.ttf")?)?;
//! let mut meme = MemeGenerator::new(surface, config)?;
//! let asset = load_asset(&std::fs::read("cat.jpg")?)?;
//! meme.on_asset_loaded(&asset)?;
//! meme.on_generate_requested("TOP TEXT", "BOTTOM TEXT")?;
//! std::fs::write("meme.png", meme.surface().encode_png()?)?;
//! ```

mod asset;
mod caption;
mod color;
mod config;
mod fit;
mod generator;
mod raster;
mod speech;
mod surface;

pub use asset::{detect_format, load_asset, probe_dimensions, AssetFormat};
pub use caption::{CaptionAnchor, CaptionLayout, CaptionStyle};
pub use color::Color;
pub use config::MemeConfig;
pub use fit::{
    compute_fit, compute_placement, fit_box, BoxDimensions, FitMode, Orientation, Placement,
};
pub use generator::{Controls, MemeGenerator};
pub use raster::RasterSurface;
pub use speech::{utterance_text, SpeechSynthesizer, Voice, Volume, VolumeLevel};
pub use surface::Surface;

use thiserror::Error;

/// Errors that can occur while fitting, composing or reading a meme
#[derive(Debug, Error)]
pub enum MemeError {
    #[error("Invalid dimensions: {field} = {value}")]
    InvalidDimensions { field: &'static str, value: f64 },

    #[error("No image loaded")]
    NoAsset,

    #[error("Image error: {0}")]
    Image(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for meme operations
pub type Result<T> = std::result::Result<T, MemeError>;
