//! HTML canvas as a meme display surface

use meme_core::{BoxDimensions, CaptionStyle, Color, MemeError, Placement, Result, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub(crate) fn surface_error(err: JsValue) -> MemeError {
    MemeError::Surface(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// A `<canvas>` element and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> std::result::Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas 2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Resize the backing pixel buffer
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for CanvasSurface {
    type Asset = HtmlImageElement;

    fn dimensions(&self) -> BoxDimensions {
        BoxDimensions::from_pixels(self.canvas.width(), self.canvas.height())
    }

    fn asset_dimensions(&self, asset: &HtmlImageElement) -> BoxDimensions {
        BoxDimensions::from_pixels(asset.natural_width(), asset.natural_height())
    }

    fn clear(&mut self) -> Result<()> {
        let size = self.dimensions();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn fill_background(&mut self, color: Color) -> Result<()> {
        let size = self.dimensions();
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn draw_asset(&mut self, asset: &HtmlImageElement, placement: &Placement) -> Result<()> {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                asset,
                placement.start_x,
                placement.start_y,
                placement.width,
                placement.height,
            )
            .map_err(surface_error)
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        baseline_y: f64,
        style: &CaptionStyle,
    ) -> Result<()> {
        self.ctx.set_font(&style.css_font());
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("alphabetic");

        if let Some(stroke) = style.stroke {
            self.ctx.set_stroke_style_str(&stroke.to_string());
            // Canvas strokes straddle the outline, so double to get the outer width
            self.ctx.set_line_width(style.stroke_width as f64 * 2.0);
            self.ctx.set_line_join("round");
            self.ctx
                .stroke_text(text, x, baseline_y)
                .map_err(surface_error)?;
        }

        self.ctx.set_fill_style_str(&style.fill.to_string());
        self.ctx
            .fill_text(text, x, baseline_y)
            .map_err(surface_error)
    }
}
