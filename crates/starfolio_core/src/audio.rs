//! Sound events and the audio sink seam
//!
//! The scene never plays audio itself. It queues [`SoundEvent`]s which the
//! application drains into whatever [`AudioSink`] it owns.

use serde::{Deserialize, Serialize};

/// A named sound and the volume to play it at
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundEffect {
    /// Identifier of the sound (usually a file stem under `assets/sounds/`)
    pub id: String,
    /// Linear volume in [0, 1]
    pub volume: f32,
}

impl SoundEffect {
    pub fn new(id: impl Into<String>, volume: f32) -> Self {
        Self {
            id: id.into(),
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

/// Handles to the sounds used by body interactions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundEffects {
    pub hover: SoundEffect,
    pub click: SoundEffect,
}

impl Default for SoundEffects {
    fn default() -> Self {
        Self {
            hover: SoundEffect::new("hover", 0.5),
            click: SoundEffect::new("click", 0.5),
        }
    }
}

/// Request to play a sound once
#[derive(Clone, Debug, PartialEq)]
pub struct SoundEvent {
    pub effect: SoundEffect,
    /// Name of the body that triggered it, for logging
    pub source: Option<String>,
}

/// Something that can play sound events
pub trait AudioSink {
    fn play(&mut self, event: &SoundEvent);
}

/// Sink that keeps every event it was asked to play
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingSink {
    played: Vec<SoundEvent>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> &[SoundEvent] {
        &self.played
    }

    /// Ids of played sounds, in order
    pub fn ids(&self) -> Vec<&str> {
        self.played.iter().map(|e| e.effect.id.as_str()).collect()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl AudioSink for RecordingSink {
    fn play(&mut self, event: &SoundEvent) {
        self.played.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_effects() {
        let effects = SoundEffects::default();
        assert_eq!(effects.hover.id, "hover");
        assert_eq!(effects.click.id, "click");
        assert_eq!(effects.hover.volume, 0.5);
    }

    #[test]
    fn test_volume_is_clamped() {
        assert_eq!(SoundEffect::new("x", 3.0).volume, 1.0);
        assert_eq!(SoundEffect::new("x", -1.0).volume, 0.0);
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        let effects = SoundEffects::default();
        sink.play(&SoundEvent { effect: effects.click.clone(), source: None });
        sink.play(&SoundEvent { effect: effects.hover.clone(), source: Some("Skills".into()) });
        assert_eq!(sink.ids(), vec!["click", "hover"]);
        assert_eq!(sink.played()[1].source.as_deref(), Some("Skills"));
    }
}
