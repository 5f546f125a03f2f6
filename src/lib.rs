//! Speech orchestration and viseme synchronization engine for animated
//! tutoring avatars. See [`core::engine::SpeechEngine`] for the entry point.

pub mod core;

// Re-export commonly used items for convenience
pub use crate::core::engine::{
    EngineConfig, EngineError, EngineResult, EngineSnapshot, Gender, MouthShape, SpeakEndCallback,
    SpeakInput, SpeechEngine, SpeechSegment, VoiceCatalog, VoiceHint, on_end, select_voice,
};
pub use crate::core::speech::{
    BaseSpeech, PlaybackHandle, SpeechError, SpeechResult, UnitEvent, VoiceDescriptor,
    VoicesChangedCallback, create_speech_provider,
};
