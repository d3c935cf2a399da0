//! Voice reader panel.
//!
//! Holds the reader settings and the reading flag. No audio is produced;
//! starting and stopping are logged only.

use crate::config::VoiceConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

pub const MIN_RATE: f32 = 0.5;
pub const MAX_RATE: f32 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Voice1,
    Voice2,
    Voice3,
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Voice::Voice1 => "Voice 1",
            Voice::Voice2 => "Voice 2",
            Voice::Voice3 => "Voice 3",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceReader {
    voice: Voice,
    speed: f32,
    pitch: f32,
    is_reading: bool,
}

/// Clamp to the slider range and snap to its 0.1 step
fn snap_rate(value: f32) -> f32 {
    if !value.is_finite() {
        return 1.0;
    }
    ((value.clamp(MIN_RATE, MAX_RATE) * 10.0).round()) / 10.0
}

impl VoiceReader {
    pub fn new(config: &VoiceConfig) -> Self {
        Self {
            voice: config.voice,
            speed: snap_rate(config.speed),
            pitch: snap_rate(config.pitch),
            is_reading: false,
        }
    }

    pub fn voice(&self) -> Voice {
        self.voice
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_reading(&self) -> bool {
        self.is_reading
    }

    pub fn set_voice(&mut self, voice: Voice) {
        self.voice = voice;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = snap_rate(speed);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = snap_rate(pitch);
    }

    pub fn start(&mut self, description: &str) {
        self.is_reading = true;
        info!(
            "🔊 Start reading ({}, {:.1}x, pitch {:.1}): {}",
            self.voice, self.speed, self.pitch, description
        );
    }

    pub fn stop(&mut self) {
        self.is_reading = false;
        info!("🔇 Stop reading");
    }

    /// The single start/stop button
    pub fn toggle(&mut self, description: &str) {
        if self.is_reading {
            self.stop();
        } else {
            self.start(description);
        }
    }
}

impl Default for VoiceReader {
    fn default() -> Self {
        Self::new(&VoiceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let reader = VoiceReader::default();
        assert_eq!(reader.voice(), Voice::Voice1);
        assert_eq!(reader.speed(), 1.0);
        assert_eq!(reader.pitch(), 1.0);
        assert!(!reader.is_reading());
    }

    #[test]
    fn test_rates_clamped_and_snapped() {
        let mut reader = VoiceReader::default();
        reader.set_speed(3.7);
        assert_eq!(reader.speed(), 2.0);
        reader.set_speed(0.1);
        assert_eq!(reader.speed(), 0.5);
        reader.set_pitch(1.26);
        assert!((reader.pitch() - 1.3).abs() < 1e-6);
        reader.set_pitch(f32::NAN);
        assert_eq!(reader.pitch(), 1.0);
    }

    #[test]
    fn test_toggle_reading() {
        let mut reader = VoiceReader::default();
        reader.toggle("This is an image file named cat.png. It has a size of 1.00 KB.");
        assert!(reader.is_reading());
        reader.toggle("");
        assert!(!reader.is_reading());
    }

    #[test]
    fn test_voice_serde_names() {
        assert_eq!(serde_json::to_string(&Voice::Voice2).unwrap(), "\"voice2\"");
        let config: VoiceConfig = serde_yaml::from_str("voice: voice3\nspeed: 1.5\n").unwrap();
        let reader = VoiceReader::new(&config);
        assert_eq!(reader.voice(), Voice::Voice3);
        assert_eq!(reader.speed(), 1.5);
        assert_eq!(reader.voice().to_string(), "Voice 3");
    }
}
