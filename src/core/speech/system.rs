//! Speech provider backed by the operating system synthesizer via the
//! [`tts`] crate (Speech Dispatcher on Linux, SAPI on Windows, AVFoundation
//! on macOS).
//!
//! The `tts` crate delivers utterance callbacks globally rather than per
//! utterance, so this adapter keeps the sender for the one in-flight unit
//! and forwards begin/end notifications onto it. The engine enforces that
//! only one unit plays at a time, which makes the single-slot sender sound.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;
use tts::Tts;

use super::base::{
    BaseSpeech, PlaybackHandle, SpeechError, SpeechResult, UnitEvent, VoiceDescriptor,
    VoicesChangedCallback,
};

pub struct SystemSpeech {
    tts: Arc<Mutex<Tts>>,
    current_unit: Arc<Mutex<Option<tokio::sync::mpsc::Sender<UnitEvent>>>>,
    // The `tts` crate has no voices-changed notification; the registration
    // is kept so a future backend can fire it.
    voices_changed: Mutex<Option<VoicesChangedCallback>>,
}

impl SystemSpeech {
    /// Initialise the system speech backend. Fails when the host platform
    /// has no synthesizer available.
    pub fn new() -> SpeechResult<Self> {
        let tts = Tts::default()
            .map_err(|e| SpeechError::Unavailable(format!("system synthesizer: {e}")))?;

        let current_unit: Arc<Mutex<Option<tokio::sync::mpsc::Sender<UnitEvent>>>> =
            Arc::new(Mutex::new(None));

        let provider = Self {
            tts: Arc::new(Mutex::new(tts)),
            current_unit,
            voices_changed: Mutex::new(None),
        };
        provider.register_utterance_callbacks()?;
        Ok(provider)
    }

    fn register_utterance_callbacks(&self) -> SpeechResult<()> {
        let mut tts = self.tts.lock();

        let unit = Arc::clone(&self.current_unit);
        tts.on_utterance_begin(Some(Box::new(move |_id| {
            if let Some(tx) = unit.lock().as_ref() {
                let _ = tx.try_send(UnitEvent::Started);
            }
        })))
        .map_err(|e| SpeechError::InternalError(format!("utterance begin callback: {e}")))?;

        let unit = Arc::clone(&self.current_unit);
        tts.on_utterance_end(Some(Box::new(move |_id| {
            if let Some(tx) = unit.lock().take() {
                let _ = tx.try_send(UnitEvent::Ended);
            }
        })))
        .map_err(|e| SpeechError::InternalError(format!("utterance end callback: {e}")))?;

        // A stopped utterance was cancelled by the engine; dropping the
        // sender closes the handle without a terminal event.
        let unit = Arc::clone(&self.current_unit);
        tts.on_utterance_stop(Some(Box::new(move |_id| {
            unit.lock().take();
        })))
        .map_err(|e| SpeechError::InternalError(format!("utterance stop callback: {e}")))?;

        Ok(())
    }

    fn describe(voice: &tts::Voice) -> VoiceDescriptor {
        let label = match voice.gender() {
            Some(tts::Gender::Male) => "male",
            Some(tts::Gender::Female) => "female",
            None => "",
        };
        VoiceDescriptor::new(voice.name(), voice.language().to_string(), label)
    }
}

#[async_trait::async_trait]
impl BaseSpeech for SystemSpeech {
    fn list_voices(&self) -> Vec<VoiceDescriptor> {
        let tts = self.tts.lock();
        match tts.voices() {
            Ok(voices) => voices.iter().map(Self::describe).collect(),
            Err(e) => {
                warn!("failed to enumerate system voices: {e}");
                Vec::new()
            }
        }
    }

    fn on_voices_changed(&self, callback: VoicesChangedCallback) {
        *self.voices_changed.lock() = Some(callback);
    }

    async fn speak(
        &self,
        text: &str,
        voice: Option<&VoiceDescriptor>,
        _locale: &str,
    ) -> SpeechResult<PlaybackHandle> {
        let (tx, handle) = PlaybackHandle::channel();
        *self.current_unit.lock() = Some(tx);

        let text = text.to_owned();
        let requested = voice.map(|v| v.name.clone());
        let tts = Arc::clone(&self.tts);

        // Tts::speak blocks until the OS has queued the utterance; run it off
        // the async executor, the way long synthesis calls are handled
        // elsewhere in this codebase.
        tokio::task::spawn_blocking(move || {
            let mut tts = tts.lock();
            if let Some(name) = requested {
                let target = name.to_lowercase();
                if let Ok(available) = tts.voices() {
                    if let Some(voice) = available
                        .iter()
                        .find(|v| v.name().to_lowercase().contains(&target))
                    {
                        if let Err(e) = tts.set_voice(voice) {
                            warn!("failed to set system voice: {e}");
                        }
                    }
                }
            }
            tts.speak(&text, true)
                .map(|_| ())
                .map_err(|e| SpeechError::PlaybackFailed(format!("{e}")))
        })
        .await
        .map_err(|e| SpeechError::InternalError(format!("blocking speak task: {e}")))??;

        Ok(handle)
    }

    async fn stop_all(&self) -> SpeechResult<()> {
        self.current_unit.lock().take();
        let tts = Arc::clone(&self.tts);
        tokio::task::spawn_blocking(move || {
            let mut tts = tts.lock();
            tts.stop()
                .map(|_| ())
                .map_err(|e| SpeechError::InternalError(format!("stop: {e}")))
        })
        .await
        .map_err(|e| SpeechError::InternalError(format!("blocking stop task: {e}")))?
    }

    fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": "system",
            "backend": "tts-crate",
        })
    }
}
