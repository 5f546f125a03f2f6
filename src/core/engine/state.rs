//! State management for the speech engine.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;

use super::callbacks::SpeakEndCallback;
use super::queue::SegmentQueue;

/// Discrete mouth shapes driving the avatar's lip animation. `Neutral` is
/// the closed-mouth rest pose; the lettered shapes form the speaking
/// alphabet the viseme ticker draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MouthShape {
    Neutral,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl MouthShape {
    /// The non-neutral shapes, in alphabet order.
    pub const SPEAKING: [MouthShape; 8] = [
        MouthShape::A,
        MouthShape::B,
        MouthShape::C,
        MouthShape::D,
        MouthShape::E,
        MouthShape::F,
        MouthShape::G,
        MouthShape::H,
    ];

    pub fn is_neutral(self) -> bool {
        self == MouthShape::Neutral
    }
}

/// Internal engine state: the UI-visible fields plus the current request's
/// queue, completion callback, and task handles, all owned by one struct
/// behind one lock. The engine is the sole writer; every mutation acquires
/// the lock and checks the generation token inside it.
pub struct EngineState {
    /// Whether a request is currently being drained.
    pub is_speaking: bool,
    /// Space-joined text of the current request; set once per request.
    pub spoken_text: String,
    /// Current mouth shape published for the avatar.
    pub mouth_shape: MouthShape,
    /// Pending segments of the current request.
    pub queue: SegmentQueue,
    /// Completion callback of the current request. Taken exactly once on a
    /// full drain; dropped without invocation on cancel/pre-emption.
    pub on_end: Option<SpeakEndCallback>,
    /// Handle of the drain task working the queue.
    pub drain_handle: Option<JoinHandle<()>>,
    /// Handle of the periodic viseme ticker.
    pub viseme_handle: Option<JoinHandle<()>>,
}

impl EngineState {
    pub fn new() -> Self {
        Self {
            is_speaking: false,
            spoken_text: String::new(),
            mouth_shape: MouthShape::Neutral,
            queue: SegmentQueue::new(),
            on_end: None,
            drain_handle: None,
            viseme_handle: None,
        }
    }

    /// Whether any request is in flight or pending.
    pub fn is_active(&self) -> bool {
        self.is_speaking
            || self.drain_handle.is_some()
            || self.on_end.is_some()
            || !self.queue.is_empty()
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

/// The only engine state the UI layer may observe.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineSnapshot {
    pub is_speaking: bool,
    pub spoken_text: String,
    pub mouth_shape: MouthShape,
    pub is_muted: bool,
}

/// Monotonically incrementing token invalidating lifecycle events that
/// belong to a superseded request or unit. Bumped on every new request,
/// cancel, and drain completion; tasks capture the token they were spawned
/// under and go quiet once it is stale.
#[derive(Debug, Default)]
pub struct GenerationCounter(AtomicU64);

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate all outstanding tokens and return the new current one.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.current() == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_bump_invalidates_older_tokens() {
        let generation = GenerationCounter::new();
        let first = generation.bump();
        assert!(generation.is_current(first));

        let second = generation.bump();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_fresh_state_is_idle() {
        let state = EngineState::new();
        assert!(!state.is_active());
        assert!(state.mouth_shape.is_neutral());
    }

    #[test]
    fn test_mouth_shape_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&MouthShape::Neutral).unwrap(),
            "\"NEUTRAL\""
        );
        assert_eq!(serde_json::to_string(&MouthShape::C).unwrap(), "\"C\"");
    }
}
