//! Speech output for reading captions aloud

use crate::{MemeError, Result};
use serde::{Deserialize, Serialize};

/// A voice offered by the platform synthesizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub name: String,
    /// BCP 47 language tag, e.g. "en-US"
    pub lang: String,
    pub is_default: bool,
}

impl Voice {
    /// Label shown in a voice picker, e.g. "Alex (en-US) [default]"
    pub fn label(&self) -> String {
        if self.is_default {
            format!("{} ({}) [default]", self.name, self.lang)
        } else {
            format!("{} ({})", self.name, self.lang)
        }
    }
}

/// Speech volume as a percentage (0 - 100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Volume(u8);

impl Volume {
    pub const MUTED: Volume = Volume(0);
    pub const MAX: Volume = Volume(100);

    pub fn new(percent: u8) -> Result<Self> {
        if percent > 100 {
            return Err(MemeError::Config(format!(
                "volume must be between 0 and 100: {percent}"
            )));
        }
        Ok(Self(percent))
    }

    /// Clamp an arbitrary slider value into range
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            return Self::MUTED;
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Gain in 0.0 - 1.0 for the synthesizer
    pub fn gain(self) -> f32 {
        self.0 as f32 / 100.0
    }

    pub fn level(self) -> VolumeLevel {
        match self.0 {
            0 => VolumeLevel::Muted,
            1..=33 => VolumeLevel::Low,
            34..=66 => VolumeLevel::Medium,
            _ => VolumeLevel::High,
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for Volume {
    type Error = MemeError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Volume> for u8 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}

/// Icon bucket for the volume indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    Medium,
    High,
}

impl VolumeLevel {
    /// Index of the matching `volume-level-N` icon
    pub fn icon_index(self) -> u8 {
        match self {
            VolumeLevel::Muted => 0,
            VolumeLevel::Low => 1,
            VolumeLevel::Medium => 2,
            VolumeLevel::High => 3,
        }
    }

    pub fn icon_path(self) -> String {
        format!("icons/volume-level-{}.svg", self.icon_index())
    }
}

/// Platform text-to-speech
pub trait SpeechSynthesizer {
    /// Voices currently available
    fn voices(&self) -> Vec<Voice>;

    /// Queue `text` for playback
    ///
    /// `voice` selects by name; `None` (or an unknown name) uses the platform default.
    fn speak(&mut self, text: &str, voice: Option<&str>, volume: Volume) -> Result<()>;

    /// Stop current and queued playback
    fn cancel(&mut self);
}

/// Text read aloud for a pair of captions
///
/// Empty captions are skipped; returns `None` when there is nothing to say.
pub fn utterance_text(top: &str, bottom: &str) -> Option<String> {
    let parts: Vec<&str> = [top.trim(), bottom.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
