//! Meme generator driven by UI events

use crate::{
    compute_placement, utterance_text, CaptionLayout, MemeConfig, MemeError, Placement, Result,
    SpeechSynthesizer, Surface, Volume,
};
use serde::Serialize;

/// Which buttons are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub generate: bool,
    pub clear: bool,
    pub read_text: bool,
}

impl Controls {
    /// Ready to caption a freshly loaded image
    pub fn ready() -> Self {
        Self {
            generate: true,
            clear: false,
            read_text: false,
        }
    }

    /// Captions drawn; can clear or read them aloud
    pub fn generated() -> Self {
        Self {
            generate: false,
            clear: true,
            read_text: true,
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::ready()
    }
}

/// Meme generator bound to a display surface
///
/// Each method handles one UI event: it computes geometry with the pure
/// fit calculator and forwards drawing to the surface.
pub struct MemeGenerator<S: Surface> {
    surface: S,
    config: MemeConfig,
    placement: Option<Placement>,
    controls: Controls,
}

impl<S: Surface> MemeGenerator<S> {
    pub fn new(surface: S, config: MemeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            surface,
            config,
            placement: None,
            controls: Controls::ready(),
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn config(&self) -> &MemeConfig {
        &self.config
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Placement of the current image, if one is loaded
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// An image finished decoding: letterbox it onto the surface
    pub fn on_asset_loaded(&mut self, asset: &S::Asset) -> Result<Placement> {
        let canvas = self.surface.dimensions();
        let image = self.surface.asset_dimensions(asset);
        let placement = compute_placement(canvas, image, self.config.fit_mode)?;

        self.surface.clear()?;
        self.surface.fill_background(self.config.background)?;
        self.surface.draw_asset(asset, &placement)?;

        tracing::info!(
            image_width = image.width,
            image_height = image.height,
            ?placement,
            "image loaded"
        );
        self.placement = Some(placement);
        self.controls = Controls::ready();
        Ok(placement)
    }

    /// Draw the top and bottom captions over the loaded image
    pub fn on_generate_requested(&mut self, top: &str, bottom: &str) -> Result<Controls> {
        if self.placement.is_none() {
            return Err(MemeError::NoAsset);
        }

        let style = &self.config.caption;
        let layout = CaptionLayout::for_surface(self.surface.dimensions(), style);
        for (text, anchor) in [(top, layout.top), (bottom, layout.bottom)] {
            if text.trim().is_empty() {
                continue;
            }
            self.surface
                .draw_text(text, anchor.x, anchor.baseline_y, style)?;
        }

        tracing::debug!(top, bottom, "captions drawn");
        self.controls = Controls::generated();
        Ok(self.controls)
    }

    /// Wipe the surface and forget the loaded image
    pub fn on_clear_requested(&mut self) -> Result<Controls> {
        self.surface.clear()?;
        self.placement = None;
        self.controls = Controls::ready();
        tracing::debug!("surface cleared");
        Ok(self.controls)
    }

    /// Read the captions aloud
    ///
    /// Returns `false` when both captions are empty and nothing was spoken.
    pub fn on_read_requested<T: SpeechSynthesizer + ?Sized>(
        &self,
        synthesizer: &mut T,
        top: &str,
        bottom: &str,
        voice: Option<&str>,
        volume: Volume,
    ) -> Result<bool> {
        let Some(text) = utterance_text(top, bottom) else {
            return Ok(false);
        };
        synthesizer.cancel();
        synthesizer.speak(&text, voice, volume)?;
        tracing::debug!(voice, volume = volume.percent(), "reading captions");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoxDimensions, CaptionStyle, Color, Voice};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Fill(Color),
        Asset(Placement),
        Text(String, f64, f64),
    }

    /// Records calls instead of drawing
    struct RecordingSurface {
        width: f64,
        height: f64,
        calls: Vec<Call>,
    }

    impl RecordingSurface {
        fn new(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                calls: Vec::new(),
            }
        }
    }

    impl Surface for RecordingSurface {
        type Asset = BoxDimensions;

        fn dimensions(&self) -> BoxDimensions {
            BoxDimensions::new(self.width, self.height)
        }

        fn asset_dimensions(&self, asset: &BoxDimensions) -> BoxDimensions {
            *asset
        }

        fn clear(&mut self) -> Result<()> {
            self.calls.push(Call::Clear);
            Ok(())
        }

        fn fill_background(&mut self, color: Color) -> Result<()> {
            self.calls.push(Call::Fill(color));
            Ok(())
        }

        fn draw_asset(&mut self, _asset: &BoxDimensions, placement: &Placement) -> Result<()> {
            self.calls.push(Call::Asset(*placement));
            Ok(())
        }

        fn draw_text(
            &mut self,
            text: &str,
            x: f64,
            baseline_y: f64,
            _style: &CaptionStyle,
        ) -> Result<()> {
            self.calls.push(Call::Text(text.to_string(), x, baseline_y));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSynth {
        spoken: Vec<(String, Option<String>, u8)>,
        cancelled: usize,
    }

    impl SpeechSynthesizer for RecordingSynth {
        fn voices(&self) -> Vec<Voice> {
            Vec::new()
        }

        fn speak(&mut self, text: &str, voice: Option<&str>, volume: Volume) -> Result<()> {
            self.spoken
                .push((text.to_string(), voice.map(String::from), volume.percent()));
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancelled += 1;
        }
    }

    fn generator() -> MemeGenerator<RecordingSurface> {
        MemeGenerator::new(RecordingSurface::new(400.0, 400.0), MemeConfig::default()).unwrap()
    }

    #[test]
    fn test_asset_loaded_draws_letterbox() {
        let mut meme = generator();
        let placement = meme
            .on_asset_loaded(&BoxDimensions::new(100.0, 200.0))
            .unwrap();

        let expected = Placement {
            width: 200.0,
            height: 400.0,
            start_x: 100.0,
            start_y: 0.0,
        };
        assert_eq!(placement, expected);
        assert_eq!(
            meme.surface().calls,
            vec![
                Call::Clear,
                Call::Fill(Color::black()),
                Call::Asset(expected)
            ]
        );
        assert_eq!(meme.controls(), Controls::ready());
    }

    #[test]
    fn test_invalid_asset_draws_nothing() {
        let mut meme = generator();
        let err = meme
            .on_asset_loaded(&BoxDimensions::new(100.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, MemeError::InvalidDimensions { .. }));
        assert!(meme.surface().calls.is_empty());
        assert_eq!(meme.placement(), None);
    }

    #[test]
    fn test_generate_draws_captions() {
        let mut meme = generator();
        meme.on_asset_loaded(&BoxDimensions::new(200.0, 100.0))
            .unwrap();
        let controls = meme.on_generate_requested("TOP", "BOTTOM").unwrap();

        assert_eq!(controls, Controls::generated());
        let calls = &meme.surface().calls;
        assert_eq!(calls[3], Call::Text("TOP".to_string(), 200.0, 50.0));
        assert_eq!(calls[4], Call::Text("BOTTOM".to_string(), 200.0, 370.0));
    }

    #[test]
    fn test_generate_skips_empty_caption() {
        let mut meme = generator();
        meme.on_asset_loaded(&BoxDimensions::new(200.0, 100.0))
            .unwrap();
        meme.on_generate_requested("  ", "BOTTOM").unwrap();

        let texts: Vec<_> = meme
            .surface()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Text(..)))
            .collect();
        assert_eq!(texts.len(), 1);
    }

    #[test]
    fn test_generate_without_asset_fails() {
        let mut meme = generator();
        let err = meme.on_generate_requested("a", "b").unwrap_err();
        assert!(matches!(err, MemeError::NoAsset));
        assert_eq!(meme.controls(), Controls::ready());
    }

    #[test]
    fn test_clear_resets() {
        let mut meme = generator();
        meme.on_asset_loaded(&BoxDimensions::new(200.0, 100.0))
            .unwrap();
        meme.on_generate_requested("a", "b").unwrap();
        let controls = meme.on_clear_requested().unwrap();

        assert_eq!(controls, Controls::ready());
        assert_eq!(meme.placement(), None);
        assert_eq!(meme.surface().calls.last(), Some(&Call::Clear));
        assert!(matches!(
            meme.on_generate_requested("a", "b"),
            Err(MemeError::NoAsset)
        ));
    }

    #[test]
    fn test_new_image_resets_controls() {
        let mut meme = generator();
        meme.on_asset_loaded(&BoxDimensions::new(200.0, 100.0))
            .unwrap();
        meme.on_generate_requested("a", "b").unwrap();
        meme.on_asset_loaded(&BoxDimensions::new(100.0, 100.0))
            .unwrap();
        assert_eq!(meme.controls(), Controls::ready());
    }

    #[test]
    fn test_read_speaks_captions() {
        let meme = generator();
        let mut synth = RecordingSynth::default();
        let volume = Volume::new(40).unwrap();

        let spoken = meme
            .on_read_requested(&mut synth, "top", "bottom", Some("Alex"), volume)
            .unwrap();

        assert!(spoken);
        assert_eq!(synth.cancelled, 1);
        assert_eq!(
            synth.spoken,
            vec![("top bottom".to_string(), Some("Alex".to_string()), 40)]
        );
    }

    #[test]
    fn test_read_empty_captions_is_silent() {
        let meme = generator();
        let mut synth = RecordingSynth::default();
        let spoken = meme
            .on_read_requested(&mut synth, "", "  ", None, Volume::MAX)
            .unwrap();
        assert!(!spoken);
        assert!(synth.spoken.is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = MemeConfig {
            canvas_width: 0,
            ..MemeConfig::default()
        };
        assert!(MemeGenerator::new(RecordingSurface::new(400.0, 400.0), config).is_err());
    }
}
