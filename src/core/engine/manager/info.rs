//! Read-only accessors for the UI layer.

use std::sync::atomic::Ordering;

use super::super::catalog::VoiceCatalog;
use super::super::config::EngineConfig;
use super::super::state::{EngineSnapshot, MouthShape};
use super::SpeechEngine;

impl SpeechEngine {
    /// Whether a request is currently being drained.
    pub fn is_speaking(&self) -> bool {
        self.state.read().is_speaking
    }

    /// Space-joined text of the most recently accepted request.
    pub fn spoken_text(&self) -> String {
        self.state.read().spoken_text.clone()
    }

    /// Current mouth shape for the avatar.
    pub fn mouth_shape(&self) -> MouthShape {
        self.state.read().mouth_shape
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Acquire)
    }

    /// Consistent snapshot of everything the UI layer may observe.
    pub fn snapshot(&self) -> EngineSnapshot {
        let state = self.state.read();
        EngineSnapshot {
            is_speaking: state.is_speaking,
            spoken_text: state.spoken_text.clone(),
            mouth_shape: state.mouth_shape,
            is_muted: self.is_muted(),
        }
    }

    /// Whether a platform speech capability is wired in.
    pub fn has_speech_capability(&self) -> bool {
        self.speech.is_some()
    }

    pub fn voice_catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn get_config(&self) -> &EngineConfig {
        &self.config
    }
}
