//! `window.speechSynthesis` as a speech output

use meme_core::{MemeError, Result, SpeechSynthesizer, Voice, Volume};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

pub struct BrowserSpeech {
    synth: SpeechSynthesis,
}

impl BrowserSpeech {
    pub fn from_window() -> std::result::Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
        Ok(Self {
            synth: window.speech_synthesis()?,
        })
    }

    fn platform_voices(&self) -> impl Iterator<Item = SpeechSynthesisVoice> {
        self.synth
            .get_voices()
            .to_vec()
            .into_iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
    }
}

impl SpeechSynthesizer for BrowserSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.platform_voices()
            .map(|v| Voice {
                name: v.name(),
                lang: v.lang(),
                is_default: v.default(),
            })
            .collect()
    }

    fn speak(&mut self, text: &str, voice: Option<&str>, volume: Volume) -> Result<()> {
        let utterance = SpeechSynthesisUtterance::new_with_text(text).map_err(|e| {
            MemeError::Speech(e.as_string().unwrap_or_else(|| format!("{e:?}")))
        })?;

        if let Some(name) = voice {
            match self.platform_voices().find(|v| v.name() == name) {
                Some(selected) => utterance.set_voice(Some(&selected)),
                None => tracing::warn!(voice = name, "voice not found, using default"),
            }
        }
        utterance.set_volume(volume.gain());

        self.synth.speak(&utterance);
        Ok(())
    }

    fn cancel(&mut self) {
        self.synth.cancel();
    }
}
