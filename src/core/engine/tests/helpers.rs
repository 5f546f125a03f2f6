//! Shared test helpers for engine tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::core::engine::callbacks::{SpeakEndCallback, on_end};
use crate::core::engine::config::EngineConfig;
use crate::core::engine::manager::SpeechEngine;
use crate::core::speech::VoiceDescriptor;

use super::stubs::ScriptedSpeech;

/// Engine config with a fast viseme ticker so tests observe shapes quickly.
pub fn test_config() -> EngineConfig {
    EngineConfig {
        viseme_interval_ms: 10,
        ..Default::default()
    }
}

/// A small English/Spanish voice catalog.
pub fn test_voices() -> Vec<VoiceDescriptor> {
    vec![
        VoiceDescriptor::new("Jenny", "en-US", "female"),
        VoiceDescriptor::new("Brian", "en-GB", "male"),
        VoiceDescriptor::new("Diego", "es-ES", "male"),
    ]
}

/// Build an engine over the given stub.
pub fn engine_over(stub: &ScriptedSpeech) -> SpeechEngine {
    SpeechEngine::new(Some(Box::new(stub.clone())), test_config())
}

/// Completion callback that counts its invocations.
pub fn counting_on_end() -> (SpeakEndCallback, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let callback = on_end(move || {
        let seen = Arc::clone(&seen);
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    });
    (callback, count)
}

/// Poll `cond` until it holds or `timeout` expires; returns the final value.
pub async fn wait_until(mut cond: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cond()
}
