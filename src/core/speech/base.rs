//! # Platform Speech Capability
//!
//! This module provides the base trait abstraction for the platform speech
//! capability the engine orchestrates. It allows a unified interface over
//! different playback backends (the operating system synthesizer, a scripted
//! test double, or any host-provided speech facility).
//!
//! The engine never synthesizes audio itself. It hands one unit of text at a
//! time to a [`BaseSpeech`] implementation and reacts to the lifecycle events
//! delivered on the returned [`PlaybackHandle`].

use async_trait::async_trait;
use futures::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;

/// A synthetic voice as reported by the platform capability.
///
/// Descriptors are read-only snapshot data; the engine re-reads the full list
/// whenever the platform announces a capability change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VoiceDescriptor {
    /// Voice name or identifier.
    pub name: String,
    /// Locale tag the voice speaks (e.g. "en-US").
    pub locale: String,
    /// Raw descriptive label from the platform; may carry gender words.
    pub label: String,
}

impl VoiceDescriptor {
    pub fn new(
        name: impl Into<String>,
        locale: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            locale: locale.into(),
            label: label.into(),
        }
    }
}

/// Lifecycle notification for one in-flight playback unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitEvent {
    /// Audio for the unit became audible.
    Started,
    /// The unit finished playing normally.
    Ended,
    /// The unit failed mid-playback. Carries the platform's reason string.
    Errored(String),
}

/// Speech-capability error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpeechError {
    #[error("speech capability unavailable: {0}")]
    Unavailable(String),
    #[error("playback failed: {0}")]
    PlaybackFailed(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Result type for speech-capability operations
pub type SpeechResult<T> = Result<T, SpeechError>;

/// A unit emits at most start, end/error, and a little slack.
const UNIT_EVENT_CAPACITY: usize = 8;

/// Correlation between one in-flight unit and the lifecycle events it will
/// receive. Owned exclusively by the engine for the duration of that unit;
/// dropping the handle detaches the engine from any late events.
pub struct PlaybackHandle {
    events: mpsc::Receiver<UnitEvent>,
}

impl PlaybackHandle {
    /// Create the sender half a provider publishes events on, paired with
    /// the handle the engine consumes them from.
    pub fn channel() -> (mpsc::Sender<UnitEvent>, Self) {
        let (tx, rx) = mpsc::channel(UNIT_EVENT_CAPACITY);
        (tx, Self { events: rx })
    }

    /// Next lifecycle event for this unit, or `None` once the provider has
    /// dropped its sender (treated as end-of-unit).
    pub async fn next_event(&mut self) -> Option<UnitEvent> {
        self.events.recv().await
    }
}

/// Callback type for capability-change notifications
pub type VoicesChangedCallback =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Base trait for platform speech capabilities
#[async_trait]
pub trait BaseSpeech: Send + Sync {
    /// Current snapshot of the voices the platform offers.
    fn list_voices(&self) -> Vec<VoiceDescriptor>;

    /// Register the single capability-change subscriber. The engine
    /// subscribes once at startup and refreshes its catalog on every
    /// notification.
    fn on_voices_changed(&self, callback: VoicesChangedCallback);

    /// Begin playback of one unit of text.
    ///
    /// # Arguments
    /// * `text` - The text to play
    /// * `voice` - Preferred voice, or `None` for the platform default
    /// * `locale` - Locale tag of the text
    ///
    /// # Returns
    /// * `SpeechResult<PlaybackHandle>` - Handle delivering the unit's
    ///   lifecycle events
    async fn speak(
        &self,
        text: &str,
        voice: Option<&VoiceDescriptor>,
        locale: &str,
    ) -> SpeechResult<PlaybackHandle>;

    /// Hard-cancel anything in flight. Best effort; late lifecycle events
    /// after a stop may still arrive and are the engine's to discard.
    async fn stop_all(&self) -> SpeechResult<()>;

    /// Get provider-specific information
    ///
    /// # Returns
    /// * `serde_json::Value` - Provider-specific information
    fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": "unknown",
        })
    }
}
