//! WASM bindings for memegen
//!
//! This crate provides a JavaScript-friendly API for:
//! - Computing letterbox placement (`computeFit`)
//! - Drawing memes onto a `<canvas>` from UI events
//! - Reading captions aloud with the browser's speech synthesis
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { MemeApp, computeFit, volumeIcon } from 'memegen-wasm';
//!
//! await init();
//!
//! const app = new MemeApp(document.getElementById('user-image'));
//!
//! img.addEventListener('load', () => app.onAssetLoaded(img));
//! form.addEventListener('submit', (e) => {
//!   e.preventDefault();
//!   const controls = app.onGenerateRequested(top.value, bottom.value);
//!   submitBtn.disabled = !controls.generate;
//!   clearBtn.disabled = !controls.clear;
//!   readBtn.disabled = !controls.readText;
//! });
//! readBtn.addEventListener('click', () =>
//!   app.onReadRequested(top.value, bottom.value, voiceSelect.value, volume.value));
//!
//! // Pure geometry, no canvas needed
//! computeFit(400, 400, 100, 200); // { width: 200, height: 400, startX: 100, startY: 0 }
//! ```

mod canvas;
mod console;
mod speech;

pub use canvas::CanvasSurface;
pub use speech::BrowserSpeech;

use meme_core::{MemeConfig, MemeError, MemeGenerator, SpeechSynthesizer, Voice, Volume};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

fn to_js_error(err: MemeError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Voice picker entry
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceOption {
    name: String,
    lang: String,
    is_default: bool,
    label: String,
}

impl From<Voice> for VoiceOption {
    fn from(voice: Voice) -> Self {
        let label = voice.label();
        VoiceOption {
            name: voice.name,
            lang: voice.lang,
            is_default: voice.is_default,
            label,
        }
    }
}

// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::init(tracing::Level::INFO);
}

/// Compute where to draw an image on a canvas
///
/// @param canvasWidth - Canvas width in pixels
/// @param canvasHeight - Canvas height in pixels
/// @param imageWidth - Natural image width
/// @param imageHeight - Natural image height
/// @returns { width, height, startX, startY }
/// @throws Error when any dimension is zero, negative or not finite
#[wasm_bindgen(js_name = computeFit)]
pub fn compute_fit(
    canvas_width: f64,
    canvas_height: f64,
    image_width: f64,
    image_height: f64,
) -> Result<JsValue, JsValue> {
    let placement = meme_core::compute_fit(canvas_width, canvas_height, image_width, image_height)
        .map_err(to_js_error)?;
    Ok(serde_wasm_bindgen::to_value(&placement)?)
}

/// Volume icon index (0 - 3) for a slider value
///
/// @param volume - Slider value (0 - 100, clamped)
#[wasm_bindgen(js_name = volumeLevel)]
pub fn volume_level(volume: f64) -> u8 {
    Volume::saturating(volume).level().icon_index()
}

/// Volume icon path for a slider value, e.g. "icons/volume-level-3.svg"
#[wasm_bindgen(js_name = volumeIcon)]
pub fn volume_icon(volume: f64) -> String {
    Volume::saturating(volume).level().icon_path()
}

/// Meme generator bound to a canvas
#[wasm_bindgen]
pub struct MemeApp {
    generator: MemeGenerator<CanvasSurface>,
    speech: Option<BrowserSpeech>,
}

#[wasm_bindgen]
impl MemeApp {
    /// Bind to a canvas, resizing it to the configured dimensions
    ///
    /// @param canvas - Target `<canvas>` element
    /// @param configJson - Optional JSON configuration (see MemeConfig)
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<MemeApp, JsValue> {
        let config = match config_json {
            Some(json) => MemeConfig::from_json(&json).map_err(to_js_error)?,
            None => MemeConfig::default(),
        };

        let surface = CanvasSurface::new(canvas)?;
        surface.resize(config.canvas_width, config.canvas_height);

        // Speech is optional; drawing still works without it
        let speech = match BrowserSpeech::from_window() {
            Ok(speech) => Some(speech),
            Err(e) => {
                tracing::warn!(error = ?e, "speech synthesis unavailable");
                None
            }
        };

        let generator = MemeGenerator::new(surface, config).map_err(to_js_error)?;
        Ok(MemeApp { generator, speech })
    }

    /// Draw a freshly loaded image, letterboxed
    ///
    /// Call from the image's `load` event.
    /// @returns Placement { width, height, startX, startY }
    #[wasm_bindgen(js_name = onAssetLoaded)]
    pub fn on_asset_loaded(&mut self, image: &HtmlImageElement) -> Result<JsValue, JsValue> {
        let placement = self
            .generator
            .on_asset_loaded(image)
            .map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&placement)?)
    }

    /// Draw the captions
    ///
    /// @returns Controls { generate, clear, readText }
    #[wasm_bindgen(js_name = onGenerateRequested)]
    pub fn on_generate_requested(&mut self, top: &str, bottom: &str) -> Result<JsValue, JsValue> {
        let controls = self
            .generator
            .on_generate_requested(top, bottom)
            .map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&controls)?)
    }

    /// Clear the canvas and stop any speech
    ///
    /// @returns Controls { generate, clear, readText }
    #[wasm_bindgen(js_name = onClearRequested)]
    pub fn on_clear_requested(&mut self) -> Result<JsValue, JsValue> {
        if let Some(speech) = self.speech.as_mut() {
            speech.cancel();
        }
        let controls = self
            .generator
            .on_clear_requested()
            .map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&controls)?)
    }

    /// Read the captions aloud
    ///
    /// @param top - Top caption
    /// @param bottom - Bottom caption
    /// @param voiceName - Voice name from `voices()`, or undefined for the default
    /// @param volume - Volume slider value (0 - 100)
    /// @returns true if anything was spoken
    #[wasm_bindgen(js_name = onReadRequested)]
    pub fn on_read_requested(
        &mut self,
        top: &str,
        bottom: &str,
        voice_name: Option<String>,
        volume: f64,
    ) -> Result<bool, JsValue> {
        let speech = self
            .speech
            .as_mut()
            .ok_or_else(|| to_js_error(MemeError::Speech("synthesis unavailable".to_string())))?;
        self.generator
            .on_read_requested(
                speech,
                top,
                bottom,
                voice_name.as_deref(),
                Volume::saturating(volume),
            )
            .map_err(to_js_error)
    }

    /// Available voices
    ///
    /// Browsers load voices asynchronously; call again after `voiceschanged`.
    /// @returns Array of { name, lang, isDefault, label }
    pub fn voices(&self) -> Result<JsValue, JsValue> {
        let voices: Vec<VoiceOption> = self
            .speech
            .as_ref()
            .map(|speech| speech.voices())
            .unwrap_or_default()
            .into_iter()
            .map(VoiceOption::from)
            .collect();
        Ok(serde_wasm_bindgen::to_value(&voices)?)
    }

    /// Initial volume slider value from the configuration
    #[wasm_bindgen(getter, js_name = defaultVolume)]
    pub fn default_volume(&self) -> u8 {
        self.generator.config().volume.percent()
    }

    /// Current button state
    ///
    /// @returns Controls { generate, clear, readText }
    pub fn controls(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.generator.controls())?)
    }
}
