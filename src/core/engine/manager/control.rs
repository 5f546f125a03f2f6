//! Cancellation, mute control, and teardown.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::{debug, warn};

use super::super::viseme::VisemeDriver;
use super::SpeechEngine;

impl SpeechEngine {
    /// Cancel whatever is in flight: discard the queue, drop the stored
    /// completion callback without invoking it, stop the mouth animation,
    /// and ask the platform to stop playback. Idempotent; a cancel with
    /// nothing in flight has no observable effect.
    pub fn cancel(&self) {
        if self.cancel_bookkeeping() {
            self.request_platform_stop();
        }
    }

    /// Synchronous half of cancellation: state flips under the lock, the
    /// generation token is retired so in-flight tasks and late platform
    /// events go quiet. Returns whether a request was actually torn down.
    pub(super) fn cancel_bookkeeping(&self) -> bool {
        let mut state = self.state.write();
        if !state.is_active() {
            return false;
        }

        self.generation.bump();
        if let Some(handle) = state.drain_handle.take() {
            handle.abort();
        }
        VisemeDriver::stop_locked(&mut state);
        state.queue.clear();
        state.on_end = None;
        state.is_speaking = false;
        debug!("speech cancelled");
        true
    }

    /// Best-effort asynchronous stop of the platform playback. The
    /// bookkeeping has already retired the generation, so anything the
    /// platform still emits for the old request is discarded.
    pub(super) fn request_platform_stop(&self) {
        let Some(speech) = &self.speech else { return };
        let speech = Arc::clone(speech);
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    if let Err(e) = speech.stop_all().await {
                        warn!(error = %e, "platform stop failed");
                    }
                });
            }
            Err(_) => debug!("no runtime for platform stop, skipping"),
        }
    }

    /// Flip the mute gate. Entering mute cancels anything in flight (the
    /// superseded request's callback is not invoked) and makes subsequent
    /// speak requests complete immediately; leaving mute only clears the
    /// flag.
    pub fn toggle_mute(&self) {
        let was_muted = self.muted.fetch_xor(true, Ordering::AcqRel);
        if !was_muted {
            self.cancel();
        }
        debug!(muted = !was_muted, "mute toggled");
    }
}

impl Drop for SpeechEngine {
    fn drop(&mut self) {
        if self.cancel_bookkeeping() {
            self.request_platform_stop();
        }
    }
}
