//! Display surface abstraction

use crate::{BoxDimensions, CaptionStyle, Color, Placement, Result};

/// A fixed-size drawing area that assets and captions are rendered into
///
/// Implemented by the native [`RasterSurface`](crate::RasterSurface) and by
/// the browser canvas binding.
pub trait Surface {
    /// Decoded image type this surface can draw
    type Asset;

    /// Pixel size of the surface
    fn dimensions(&self) -> BoxDimensions;

    /// Natural (intrinsic) size of a decoded asset
    fn asset_dimensions(&self, asset: &Self::Asset) -> BoxDimensions;

    /// Reset every pixel to transparent
    fn clear(&mut self) -> Result<()>;

    /// Fill the whole surface with a solid color
    fn fill_background(&mut self, color: Color) -> Result<()>;

    /// Draw `asset` scaled into `placement`
    fn draw_asset(&mut self, asset: &Self::Asset, placement: &Placement) -> Result<()>;

    /// Draw `text` horizontally centered on `x` with its baseline at `baseline_y`
    fn draw_text(&mut self, text: &str, x: f64, baseline_y: f64, style: &CaptionStyle)
        -> Result<()>;
}
