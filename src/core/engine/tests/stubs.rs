//! Stub speech capability for testing the engine in isolation.

use parking_lot::RwLock as SyncRwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::core::speech::{
    BaseSpeech, PlaybackHandle, SpeechResult, UnitEvent, VoiceDescriptor, VoicesChangedCallback,
};

/// Record of one unit the engine handed to the stub.
#[derive(Debug, Clone)]
pub struct SpokenUnit {
    pub text: String,
    pub voice: Option<String>,
    pub locale: String,
}

/// Scripted platform capability. In auto mode every unit plays itself out
/// (`Started` at once, `Ended` after a fixed delay); in manual mode the
/// test drives lifecycle events through the stashed senders.
#[derive(Clone)]
pub struct ScriptedSpeech {
    voices: Arc<SyncRwLock<Vec<VoiceDescriptor>>>,
    voices_changed: Arc<SyncRwLock<Option<VoicesChangedCallback>>>,
    auto_complete_after: Option<Duration>,
    spoken: Arc<SyncRwLock<Vec<SpokenUnit>>>,
    senders: Arc<SyncRwLock<Vec<mpsc::Sender<UnitEvent>>>>,
    stop_all_calls: Arc<AtomicUsize>,
}

impl ScriptedSpeech {
    /// Units complete on their own after `unit_duration`.
    pub fn auto(unit_duration: Duration) -> Self {
        Self {
            voices: Arc::new(SyncRwLock::new(Vec::new())),
            voices_changed: Arc::new(SyncRwLock::new(None)),
            auto_complete_after: Some(unit_duration),
            spoken: Arc::new(SyncRwLock::new(Vec::new())),
            senders: Arc::new(SyncRwLock::new(Vec::new())),
            stop_all_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Units emit no events until the test sends them.
    pub fn manual() -> Self {
        Self {
            auto_complete_after: None,
            ..Self::auto(Duration::ZERO)
        }
    }

    pub fn with_voices(self, voices: Vec<VoiceDescriptor>) -> Self {
        *self.voices.write() = voices;
        self
    }

    pub fn set_voices(&self, voices: Vec<VoiceDescriptor>) {
        *self.voices.write() = voices;
    }

    /// Invoke the engine's capability-change subscriber, as the platform
    /// would after the voice list changed.
    pub async fn fire_voices_changed(&self) {
        let callback = self.voices_changed.read().clone();
        if let Some(callback) = callback {
            callback().await;
        }
    }

    pub fn spoken(&self) -> Vec<SpokenUnit> {
        self.spoken.read().clone()
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken.read().iter().map(|u| u.text.clone()).collect()
    }

    pub fn unit_count(&self) -> usize {
        self.spoken.read().len()
    }

    pub fn stop_all_count(&self) -> usize {
        self.stop_all_calls.load(Ordering::SeqCst)
    }

    /// Sender for the `index`-th unit the engine started, for manual-mode
    /// lifecycle scripting.
    pub fn sender(&self, index: usize) -> mpsc::Sender<UnitEvent> {
        self.senders.read()[index].clone()
    }
}

#[async_trait::async_trait]
impl BaseSpeech for ScriptedSpeech {
    fn list_voices(&self) -> Vec<VoiceDescriptor> {
        self.voices.read().clone()
    }

    fn on_voices_changed(&self, callback: VoicesChangedCallback) {
        *self.voices_changed.write() = Some(callback);
    }

    async fn speak(
        &self,
        text: &str,
        voice: Option<&VoiceDescriptor>,
        locale: &str,
    ) -> SpeechResult<PlaybackHandle> {
        let (tx, handle) = PlaybackHandle::channel();
        self.spoken.write().push(SpokenUnit {
            text: text.to_string(),
            voice: voice.map(|v| v.name.clone()),
            locale: locale.to_string(),
        });
        self.senders.write().push(tx.clone());

        if let Some(delay) = self.auto_complete_after {
            tokio::spawn(async move {
                let _ = tx.send(UnitEvent::Started).await;
                tokio::time::sleep(delay).await;
                let _ = tx.send(UnitEvent::Ended).await;
            });
        }

        Ok(handle)
    }

    async fn stop_all(&self) -> SpeechResult<()> {
        self.stop_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": "scripted",
            "test_only": true,
        })
    }
}
