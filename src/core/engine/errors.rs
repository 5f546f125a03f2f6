//! Error types for speech-engine operations.

use crate::core::speech::SpeechError;

/// Error types for speech-engine construction and internals. Orchestration
/// itself never surfaces errors to the UI layer; per-unit failures are
/// logged and the queue advances.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("speech error: {0}")]
    Speech(#[from] SpeechError),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Result type for speech-engine operations
pub type EngineResult<T> = Result<T, EngineError>;
