//! In-memory RGBA surface for rendering memes without a browser

use crate::{BoxDimensions, CaptionStyle, Color, MemeError, Placement, Result, Surface};
use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Pixel, Rgba, RgbaImage};
use std::io::Cursor;

/// A fixed-size RGBA canvas
///
/// Captions need a TrueType/OpenType font, supplied with [`RasterSurface::with_font`].
pub struct RasterSurface {
    canvas: RgbaImage,
    font: Option<FontArc>,
    filter: FilterType,
}

impl RasterSurface {
    /// Create a transparent surface
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            let (field, value) = if width == 0 {
                ("canvas_width", width)
            } else {
                ("canvas_height", height)
            };
            return Err(MemeError::InvalidDimensions {
                field,
                value: value as f64,
            });
        }
        Ok(Self {
            canvas: RgbaImage::new(width, height),
            font: None,
            filter: FilterType::Triangle,
        })
    }

    /// Load the caption font from TTF/OTF bytes
    pub fn with_font(mut self, font_data: Vec<u8>) -> Result<Self> {
        let font =
            FontArc::try_from_vec(font_data).map_err(|e| MemeError::Font(e.to_string()))?;
        self.font = Some(font);
        Ok(self)
    }

    /// Resampling filter used when scaling assets
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    /// Encode the current contents as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.canvas
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Advance width of `text` at the style's font size
    pub fn measure_text(&self, text: &str, style: &CaptionStyle) -> Result<f64> {
        let font = self.font()?;
        let scaled = font.as_scaled(PxScale::from(style.font_size));
        let mut width = 0.0f32;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        Ok(width as f64)
    }

    fn font(&self) -> Result<&FontArc> {
        self.font
            .as_ref()
            .ok_or_else(|| MemeError::Font("no caption font loaded".to_string()))
    }

    /// Rasterize one run of text with its left edge at `left`
    fn blit_text(&mut self, text: &str, left: f32, baseline: f32, size: f32, color: Color) {
        let Some(font) = self.font.clone() else {
            return;
        };
        let scale = PxScale::from(size);
        let scaled = font.as_scaled(scale);
        let (canvas_width, canvas_height) = self.canvas.dimensions();

        let mut caret = left;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                if x < 0 || y < 0 || x >= canvas_width as i64 || y >= canvas_height as i64 {
                    return;
                }
                let alpha = (color.a as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
                let src = Rgba([color.r, color.g, color.b, alpha]);
                self.canvas.get_pixel_mut(x as u32, y as u32).blend(&src);
            });
        }
    }
}

impl Surface for RasterSurface {
    type Asset = DynamicImage;

    fn dimensions(&self) -> BoxDimensions {
        BoxDimensions::from_pixels(self.canvas.width(), self.canvas.height())
    }

    fn asset_dimensions(&self, asset: &DynamicImage) -> BoxDimensions {
        BoxDimensions::from_pixels(asset.width(), asset.height())
    }

    fn clear(&mut self) -> Result<()> {
        self.canvas.fill(0);
        Ok(())
    }

    fn fill_background(&mut self, color: Color) -> Result<()> {
        let rgba = color.to_rgba();
        for pixel in self.canvas.pixels_mut() {
            *pixel = rgba;
        }
        Ok(())
    }

    fn draw_asset(&mut self, asset: &DynamicImage, placement: &Placement) -> Result<()> {
        let Some(blit) = clip_placement(
            self.canvas.dimensions(),
            (asset.width(), asset.height()),
            placement,
        ) else {
            return Ok(());
        };
        let region = imageops::crop_imm(
            asset,
            blit.src_x,
            blit.src_y,
            blit.src_width,
            blit.src_height,
        )
        .to_image();
        let scaled = imageops::resize(&region, blit.dst_width, blit.dst_height, self.filter);
        imageops::overlay(&mut self.canvas, &scaled, blit.dst_x as i64, blit.dst_y as i64);
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        baseline_y: f64,
        style: &CaptionStyle,
    ) -> Result<()> {
        let text_width = self.measure_text(text, style)?;
        let left = (x - text_width / 2.0) as f32;
        let baseline = baseline_y as f32;

        if let Some(stroke) = style.stroke {
            let radius = style.stroke_width.max(0.0).round() as i32;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if (dx, dy) != (0, 0) {
                        self.blit_text(
                            text,
                            left + dx as f32,
                            baseline + dy as f32,
                            style.font_size,
                            stroke,
                        );
                    }
                }
            }
        }
        self.blit_text(text, left, baseline, style.font_size, style.fill);
        Ok(())
    }
}

/// Visible part of a placement: the asset crop and where it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Blit {
    src_x: u32,
    src_y: u32,
    src_width: u32,
    src_height: u32,
    dst_x: u32,
    dst_y: u32,
    dst_width: u32,
    dst_height: u32,
}

/// Intersect a placement with the surface
///
/// Returns `None` when nothing is visible. The destination never exceeds the
/// surface, so cover placements far larger than the canvas stay cheap.
fn clip_placement(
    surface: (u32, u32),
    asset: (u32, u32),
    placement: &Placement,
) -> Option<Blit> {
    let (x, y, width, height) = placement.to_pixel_rect();
    let (dst_x, dst_width, src_x, src_width) = clip_axis(x, width, surface.0, asset.0)?;
    let (dst_y, dst_height, src_y, src_height) = clip_axis(y, height, surface.1, asset.1)?;
    Some(Blit {
        src_x,
        src_y,
        src_width,
        src_height,
        dst_x,
        dst_y,
        dst_width,
        dst_height,
    })
}

/// One axis of [`clip_placement`]: (dst_start, dst_len, src_start, src_len)
fn clip_axis(
    start: i64,
    len: u32,
    surface_len: u32,
    asset_len: u32,
) -> Option<(u32, u32, u32, u32)> {
    if asset_len == 0 {
        return None;
    }
    let visible_start = start.max(0);
    let visible_end = (start + len as i64).min(surface_len as i64);
    if visible_end <= visible_start {
        return None;
    }

    let scale = asset_len as f64 / len as f64;
    let src_start = (((visible_start - start) as f64 * scale).floor() as u32).min(asset_len - 1);
    let src_end =
        (((visible_end - start) as f64 * scale).ceil() as u32).clamp(src_start + 1, asset_len);
    Some((
        visible_start as u32,
        (visible_end - visible_start) as u32,
        src_start,
        src_end - src_start,
    ))
}
