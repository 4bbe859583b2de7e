//! Decoding user-supplied image files

use crate::{BoxDimensions, MemeError, Result};
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

impl From<image::ImageError> for MemeError {
    fn from(err: image::ImageError) -> Self {
        MemeError::Image(err.to_string())
    }
}

/// Detected image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
}

impl AssetFormat {
    fn to_image_format(self) -> image::ImageFormat {
        match self {
            AssetFormat::Jpeg => image::ImageFormat::Jpeg,
            AssetFormat::Png => image::ImageFormat::Png,
            AssetFormat::Gif => image::ImageFormat::Gif,
            AssetFormat::WebP => image::ImageFormat::WebP,
            AssetFormat::Bmp => image::ImageFormat::Bmp,
        }
    }

    /// MIME type, for object URLs and downloads
    pub fn mime_type(self) -> &'static str {
        match self {
            AssetFormat::Jpeg => "image/jpeg",
            AssetFormat::Png => "image/png",
            AssetFormat::Gif => "image/gif",
            AssetFormat::WebP => "image/webp",
            AssetFormat::Bmp => "image/bmp",
        }
    }
}

/// Detect image format from magic bytes
pub fn detect_format(data: &[u8]) -> Result<AssetFormat> {
    if data.len() < 8 {
        return Err(MemeError::Image("Image data too short".to_string()));
    }

    // JPEG SOI marker: FF D8 FF
    if data[..3] == [0xFF, 0xD8, 0xFF] {
        return Ok(AssetFormat::Jpeg);
    }

    // PNG signature: 89 50 4E 47 0D 0A 1A 0A
    if data[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return Ok(AssetFormat::Png);
    }

    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Ok(AssetFormat::Gif);
    }

    // RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Ok(AssetFormat::WebP);
    }

    if data.starts_with(b"BM") {
        return Ok(AssetFormat::Bmp);
    }

    Err(MemeError::Image("Unknown image format".to_string()))
}

fn reader(data: &[u8]) -> Result<(AssetFormat, ImageReader<Cursor<&[u8]>>)> {
    let format = detect_format(data)?;
    let reader = ImageReader::with_format(Cursor::new(data), format.to_image_format());
    Ok((format, reader))
}

/// Natural dimensions from the image header, without decoding pixels
pub fn probe_dimensions(data: &[u8]) -> Result<BoxDimensions> {
    let (_, reader) = reader(data)?;
    let (width, height) = reader.into_dimensions()?;
    BoxDimensions::from_pixels(width, height).validated("image")
}

/// Decode an image file into pixels
///
/// Animated formats decode to their first frame.
pub fn load_asset(data: &[u8]) -> Result<DynamicImage> {
    let (format, reader) = reader(data)?;
    let image = reader.decode()?;
    tracing::debug!(
        format = format.mime_type(),
        width = image.width(),
        height = image.height(),
        "decoded asset"
    );
    check_decoded(&image)?;
    Ok(image)
}

fn check_decoded(image: &DynamicImage) -> Result<()> {
    BoxDimensions::from_pixels(image.width(), image.height()).validated("image")?;
    Ok(())
}
