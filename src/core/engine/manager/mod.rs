//! Main SpeechEngine implementation, split into focused submodules:
//! construction and catalog wiring, the speak entry point, the drain task,
//! cancellation/mute control, and read-only accessors.

mod constructors;
mod control;
mod drain;
mod info;
mod speak;

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::core::speech::BaseSpeech;

use super::catalog::VoiceCatalog;
use super::config::EngineConfig;
use super::state::{EngineState, GenerationCounter};
use super::viseme::VisemeDriver;

/// Orchestrates speech playback for the avatar: accepts speak requests,
/// normalizes them into segment queues, drives one unit at a time through
/// the platform speech capability, keeps the mouth-shape signal in sync
/// with playback, and owns cancellation and mute semantics.
///
/// All mutable bookkeeping lives in one [`EngineState`] behind one lock,
/// with the engine as sole writer; lifecycle events of superseded requests
/// are discarded via a generation token.
pub struct SpeechEngine {
    /// Platform speech capability; `None` degrades every request to an
    /// immediate completion.
    pub(super) speech: Option<Arc<dyn BaseSpeech>>,
    pub(super) catalog: Arc<VoiceCatalog>,
    pub(super) state: Arc<RwLock<EngineState>>,
    pub(super) generation: Arc<GenerationCounter>,
    pub(super) viseme: Arc<VisemeDriver>,
    pub(super) muted: AtomicBool,
    pub(super) config: EngineConfig,
}

// Compile-time assertion that SpeechEngine is Send + Sync, relying on all
// fields being thread-safe.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<SpeechEngine>;
};
