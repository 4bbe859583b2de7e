//! Letterbox fitting of an asset into a display surface

use crate::{MemeError, Result};
use serde::{Deserialize, Serialize};

/// Extent of a rectangle (display surface or decoded asset)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    pub width: f64,
    pub height: f64,
}

impl BoxDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Dimensions of a pixel grid (canvas or natural image size)
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    /// Check that both sides are positive and finite
    ///
    /// `prefix` names the rectangle in the error, e.g. "canvas" yields
    /// `canvas_width` / `canvas_height`.
    pub fn validated(self, prefix: &'static str) -> Result<Self> {
        let (width_field, height_field) = match prefix {
            "canvas" => ("canvas_width", "canvas_height"),
            "image" => ("image_width", "image_height"),
            _ => ("width", "height"),
        };
        Ok(Self {
            width: check_dimension(width_field, self.width)?,
            height: check_dimension(height_field, self.height)?,
        })
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Shape of an asset as seen by the fit calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Taller than wide
    Portrait,
    /// Wider than tall
    Landscape,
    /// Equal sides
    Square,
}

impl Orientation {
    pub fn from_aspect_ratio(aspect_ratio: f64) -> Self {
        if aspect_ratio < 1.0 {
            Orientation::Portrait
        } else if aspect_ratio > 1.0 {
            Orientation::Landscape
        } else {
            Orientation::Square
        }
    }
}

/// Where to draw an asset, in display surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub width: f64,
    pub height: f64,
    pub start_x: f64,
    pub start_y: f64,
}

impl Placement {
    /// X coordinate of the right edge
    pub fn right(&self) -> f64 {
        self.start_x + self.width
    }

    /// Y coordinate of the bottom edge
    pub fn bottom(&self) -> f64 {
        self.start_y + self.height
    }

    /// Snap to whole pixels: (x, y, width, height)
    ///
    /// Width and height are at least one pixel.
    pub fn to_pixel_rect(&self) -> (i64, i64, u32, u32) {
        (
            self.start_x.round() as i64,
            self.start_y.round() as i64,
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }

    fn ensure_finite(self) -> Result<Self> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("start_x", self.start_x),
            ("start_y", self.start_y),
        ] {
            if !value.is_finite() {
                return Err(MemeError::InvalidDimensions { field, value });
            }
        }
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value <= 0.0 {
                return Err(MemeError::InvalidDimensions { field, value });
            }
        }
        Ok(self)
    }
}

/// Scaling strategy for placing an asset on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Largest size that fits entirely, letterboxed (meme default)
    #[default]
    Contain,
    /// Smallest size that covers the surface, overflow centered and cropped
    Cover,
    /// Fill the surface exactly, ignoring aspect ratio
    Stretch,
}

fn check_dimension(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        tracing::warn!(field, value, "rejecting dimension");
        Err(MemeError::InvalidDimensions { field, value })
    }
}

/// Span the full canvas height, center horizontally
///
/// Offsets are clamped at zero so rounding in a fallback fit never places
/// the asset past the top-left corner.
fn fit_to_height(canvas_width: f64, canvas_height: f64, aspect_ratio: f64) -> Placement {
    let width = canvas_height * aspect_ratio;
    Placement {
        width,
        height: canvas_height,
        start_x: ((canvas_width - width) / 2.0).max(0.0),
        start_y: 0.0,
    }
}

/// Span the full canvas width, center vertically
fn fit_to_width(canvas_width: f64, canvas_height: f64, aspect_ratio: f64) -> Placement {
    let height = canvas_width / aspect_ratio;
    Placement {
        width: canvas_width,
        height,
        start_x: 0.0,
        start_y: ((canvas_height - height) / 2.0).max(0.0),
    }
}

/// Compute the letterbox placement of an image inside a canvas
///
/// Portrait images (aspect ratio below 1) span the canvas height and are
/// centered horizontally; landscape and square images span the canvas width
/// and are centered vertically. If the canvas is shaped so that the chosen
/// axis would overflow the other one, the other axis is spanned instead.
///
/// # Arguments
/// * `canvas_width` - Display surface width
/// * `canvas_height` - Display surface height
/// * `image_width` - Natural width of the decoded image
/// * `image_height` - Natural height of the decoded image
///
/// # Errors
/// `MemeError::InvalidDimensions` if any input is zero, negative, NaN or
/// infinite, or if the ratio between them is too extreme to produce a
/// finite, non-empty placement.
pub fn compute_fit(
    canvas_width: f64,
    canvas_height: f64,
    image_width: f64,
    image_height: f64,
) -> Result<Placement> {
    let canvas_width = check_dimension("canvas_width", canvas_width)?;
    let canvas_height = check_dimension("canvas_height", canvas_height)?;
    let image_width = check_dimension("image_width", image_width)?;
    let image_height = check_dimension("image_height", image_height)?;

    let aspect_ratio = check_dimension("aspect_ratio", image_width / image_height)?;

    let orientation = Orientation::from_aspect_ratio(aspect_ratio);
    let portrait = orientation == Orientation::Portrait;
    let mut placement = if portrait {
        fit_to_height(canvas_width, canvas_height, aspect_ratio)
    } else {
        fit_to_width(canvas_width, canvas_height, aspect_ratio)
    };

    if placement.width > canvas_width || placement.height > canvas_height {
        placement = if portrait {
            fit_to_width(canvas_width, canvas_height, aspect_ratio)
        } else {
            fit_to_height(canvas_width, canvas_height, aspect_ratio)
        };
    }

    let placement = placement.ensure_finite()?;
    tracing::debug!(
        canvas_width,
        canvas_height,
        image_width,
        image_height,
        ?orientation,
        ?placement,
        "computed fit"
    );
    Ok(placement)
}

/// [`compute_fit`] for dimension pairs
pub fn fit_box(canvas: BoxDimensions, image: BoxDimensions) -> Result<Placement> {
    compute_fit(canvas.width, canvas.height, image.width, image.height)
}

/// Compute a placement for the given scaling mode
pub fn compute_placement(
    canvas: BoxDimensions,
    image: BoxDimensions,
    mode: FitMode,
) -> Result<Placement> {
    match mode {
        FitMode::Contain => fit_box(canvas, image),
        FitMode::Cover => {
            let canvas = canvas.validated("canvas")?;
            let image = image.validated("image")?;
            let scale = (canvas.width / image.width).max(canvas.height / image.height);
            let width = image.width * scale;
            let height = image.height * scale;
            Placement {
                width,
                height,
                start_x: (canvas.width - width) / 2.0,
                start_y: (canvas.height - height) / 2.0,
            }
            .ensure_finite()
        }
        FitMode::Stretch => {
            let canvas = canvas.validated("canvas")?;
            image.validated("image")?;
            Ok(Placement {
                width: canvas.width,
                height: canvas.height,
                start_x: 0.0,
                start_y: 0.0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn placement(width: f64, height: f64, start_x: f64, start_y: f64) -> Placement {
        Placement {
            width,
            height,
            start_x,
            start_y,
        }
    }

    #[test]
    fn test_portrait_on_square_canvas() {
        let p = compute_fit(400.0, 400.0, 100.0, 200.0).unwrap();
        assert_eq!(p, placement(200.0, 400.0, 100.0, 0.0));
    }

    #[test]
    fn test_landscape_on_square_canvas() {
        let p = compute_fit(400.0, 400.0, 200.0, 100.0).unwrap();
        assert_eq!(p, placement(400.0, 200.0, 0.0, 100.0));
    }

    #[test]
    fn test_square_on_square_canvas() {
        let p = compute_fit(400.0, 400.0, 150.0, 150.0).unwrap();
        assert_eq!(p, placement(400.0, 400.0, 0.0, 0.0));
    }

    #[test]
    fn test_portrait_on_wide_canvas() {
        let p = compute_fit(800.0, 400.0, 100.0, 200.0).unwrap();
        assert_eq!(p, placement(200.0, 400.0, 300.0, 0.0));
    }

    #[test]
    fn test_square_on_wide_canvas_spans_height() {
        // Landscape branch would give 800x800 on an 800x400 canvas
        let p = compute_fit(800.0, 400.0, 50.0, 50.0).unwrap();
        assert_eq!(p, placement(400.0, 400.0, 200.0, 0.0));
    }

    #[test]
    fn test_square_on_tall_canvas_centers_vertically() {
        let p = compute_fit(400.0, 800.0, 50.0, 50.0).unwrap();
        assert_eq!(p, placement(400.0, 400.0, 0.0, 200.0));
    }

    #[test]
    fn test_landscape_on_very_wide_canvas() {
        let p = compute_fit(400.0, 100.0, 300.0, 200.0).unwrap();
        assert_eq!(p, placement(150.0, 100.0, 125.0, 0.0));
    }

    #[test]
    fn test_portrait_on_very_tall_canvas() {
        let p = compute_fit(100.0, 400.0, 100.0, 200.0).unwrap();
        assert_eq!(p, placement(100.0, 200.0, 0.0, 100.0));
    }

    #[test]
    fn test_zero_image_height_rejected() {
        let err = compute_fit(400.0, 400.0, 100.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            MemeError::InvalidDimensions {
                field: "image_height",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(compute_fit(f64::NAN, 400.0, 100.0, 100.0).is_err());
        assert!(compute_fit(400.0, f64::INFINITY, 100.0, 100.0).is_err());
        assert!(compute_fit(400.0, 400.0, f64::NEG_INFINITY, 100.0).is_err());
        assert!(compute_fit(400.0, 400.0, 100.0, f64::NAN).is_err());
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let err = compute_fit(-400.0, 400.0, 100.0, 100.0).unwrap_err();
        assert!(matches!(
            err,
            MemeError::InvalidDimensions {
                field: "canvas_width",
                ..
            }
        ));
        assert!(compute_fit(400.0, 0.0, 100.0, 100.0).is_err());
        assert!(compute_fit(400.0, 400.0, -1.0, 100.0).is_err());
    }

    #[test]
    fn test_extreme_ratio_rejected() {
        // Aspect ratio overflows to infinity
        assert!(compute_fit(400.0, 400.0, f64::MAX, f64::MIN_POSITIVE).is_err());
    }

    #[test]
    fn test_orientation() {
        assert_eq!(Orientation::from_aspect_ratio(0.5), Orientation::Portrait);
        assert_eq!(Orientation::from_aspect_ratio(2.0), Orientation::Landscape);
        assert_eq!(Orientation::from_aspect_ratio(1.0), Orientation::Square);
    }

    #[test]
    fn test_validated_names_fields() {
        let err = BoxDimensions::new(0.0, 10.0)
            .validated("canvas")
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid dimensions: canvas_width = 0");
    }

    #[test]
    fn test_placement_edges() {
        let p = placement(200.0, 400.0, 100.0, 0.0);
        assert_eq!(p.right(), 300.0);
        assert_eq!(p.bottom(), 400.0);
    }

    #[test]
    fn test_pixel_rect_rounding() {
        let p = placement(133.4, 200.0, 133.3, 0.0);
        assert_eq!(p.to_pixel_rect(), (133, 0, 133, 200));

        let tiny = placement(0.2, 400.0, 199.9, 0.0);
        assert_eq!(tiny.to_pixel_rect(), (200, 0, 1, 400));
    }

    #[test]
    fn test_placement_serializes_camel_case() {
        let json = serde_json::to_value(placement(200.0, 400.0, 100.0, 0.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "width": 200.0, "height": 400.0, "startX": 100.0, "startY": 0.0 })
        );
    }

    #[test]
    fn test_fit_mode_default() {
        assert_eq!(FitMode::default(), FitMode::Contain);
    }

    #[test]
    fn test_compute_placement_contain_matches_compute_fit() {
        let canvas = BoxDimensions::new(800.0, 400.0);
        let image = BoxDimensions::new(100.0, 200.0);
        assert_eq!(
            compute_placement(canvas, image, FitMode::Contain).unwrap(),
            compute_fit(800.0, 400.0, 100.0, 200.0).unwrap()
        );
    }

    #[test]
    fn test_compute_placement_cover() {
        // 200x100 image on 400x400: scale 4, 800x400, overflow centered
        let p = compute_placement(
            BoxDimensions::new(400.0, 400.0),
            BoxDimensions::new(200.0, 100.0),
            FitMode::Cover,
        )
        .unwrap();
        assert_eq!(p, placement(800.0, 400.0, -200.0, 0.0));
    }

    #[test]
    fn test_compute_placement_stretch() {
        let p = compute_placement(
            BoxDimensions::new(400.0, 300.0),
            BoxDimensions::new(10.0, 1000.0),
            FitMode::Stretch,
        )
        .unwrap();
        assert_eq!(p, placement(400.0, 300.0, 0.0, 0.0));
    }

    #[test]
    fn test_compute_placement_validates_in_every_mode() {
        let canvas = BoxDimensions::new(400.0, 400.0);
        let bad = BoxDimensions::new(100.0, 0.0);
        for mode in [FitMode::Contain, FitMode::Cover, FitMode::Stretch] {
            assert!(compute_placement(canvas, bad, mode).is_err(), "{mode:?}");
        }
    }
}
