pub mod engine;
pub mod speech;

// Re-export commonly used types for convenience
pub use self::engine::{
    EngineConfig, EngineError, EngineResult, EngineSnapshot, Gender, MouthShape, SpeakEndCallback,
    SpeakInput, SpeechEngine, SpeechSegment, VoiceCatalog, VoiceHint, select_voice,
};

pub use self::speech::{
    BaseSpeech, PlaybackHandle, SpeechError, SpeechResult, UnitEvent, VoiceDescriptor,
    VoicesChangedCallback, create_speech_provider,
};
