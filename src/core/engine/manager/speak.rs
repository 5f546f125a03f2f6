//! The speak entry point: request normalization and drain kickoff.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::debug;

use super::super::callbacks::SpeakEndCallback;
use super::super::segment::{SpeakInput, SpeechSegment, VoiceHint, normalize_input};
use super::super::state::MouthShape;
use super::SpeechEngine;
use super::drain::{DrainContext, spawn_drain_task};

impl SpeechEngine {
    /// Queue a speak request. Fire-and-forget: returns immediately, with
    /// completion observed via `on_end` and the engine state. Any request
    /// already in flight is cancelled first and its callback dropped, not
    /// invoked. Must be called from within the runtime.
    ///
    /// `hint` is the caller's optional voice preference: a locale tag
    /// applied to single-text input, or a gender applied to every segment.
    pub fn speak(
        &self,
        input: impl Into<SpeakInput>,
        on_end: Option<SpeakEndCallback>,
        hint: Option<VoiceHint>,
    ) {
        if self.muted.load(Ordering::Acquire) {
            debug!("speak while muted, completing immediately");
            complete_now(on_end);
            return;
        }
        let Some(speech) = &self.speech else {
            debug!("speak without speech capability, completing immediately");
            complete_now(on_end);
            return;
        };

        // Pre-emption: the newer request silently replaces the older one.
        self.cancel();

        let gender = hint.as_ref().and_then(VoiceHint::gender);
        let default_lang = match &hint {
            Some(VoiceHint::Locale(tag)) => tag.clone(),
            _ => self.config.default_language.clone(),
        };

        let segments = normalize_input(input.into(), &default_lang);
        if segments.is_empty() {
            debug!("speak request normalized to zero segments, completing immediately");
            complete_now(on_end);
            return;
        }

        let spoken_text = segments
            .iter()
            .map(SpeechSegment::text)
            .collect::<Vec<_>>()
            .join(" ");
        debug!(segments = segments.len(), text = %spoken_text, "speak request accepted");

        let ctx = DrainContext {
            speech: Arc::clone(speech),
            catalog: Arc::clone(&self.catalog),
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
            viseme: Arc::clone(&self.viseme),
            config: self.config.clone(),
            gender,
        };

        let mut state = self.state.write();
        let token = self.generation.bump();
        state.is_speaking = true;
        state.spoken_text = spoken_text;
        state.mouth_shape = MouthShape::A;
        state.queue.replace(segments);
        state.on_end = on_end;
        state.drain_handle = Some(spawn_drain_task(ctx, token));
    }
}

/// Degraded completion path: the request never queues, its callback fires
/// at once on the runtime.
fn complete_now(on_end: Option<SpeakEndCallback>) {
    if let Some(callback) = on_end {
        tokio::spawn(async move {
            callback().await;
        });
    }
}
