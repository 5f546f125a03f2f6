//! SpeechEngine construction and voice-catalog wiring.

use parking_lot::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Weak};
use tracing::{debug, info};

use crate::core::speech::{BaseSpeech, VoicesChangedCallback, create_speech_provider};

use super::super::catalog::VoiceCatalog;
use super::super::config::EngineConfig;
use super::super::errors::EngineResult;
use super::super::state::{EngineState, GenerationCounter};
use super::super::viseme::VisemeDriver;
use super::SpeechEngine;

impl SpeechEngine {
    /// Create an engine over the given platform speech capability. Passing
    /// `None` builds a degraded engine whose every request completes
    /// immediately with no audio and no animation.
    pub fn new(provider: Option<Box<dyn BaseSpeech>>, config: EngineConfig) -> Self {
        let speech: Option<Arc<dyn BaseSpeech>> = provider.map(Arc::from);
        let catalog = Arc::new(VoiceCatalog::new());
        let state = Arc::new(RwLock::new(EngineState::new()));
        let generation = Arc::new(GenerationCounter::new());
        let viseme = Arc::new(VisemeDriver::new(
            Arc::clone(&state),
            Arc::clone(&generation),
            config.viseme_interval_ms,
        ));

        match &speech {
            Some(speech) => {
                catalog.refresh(speech.list_voices());
                speech.on_voices_changed(catalog_refresher(speech, &catalog));
            }
            None => info!("no speech capability available, engine degraded"),
        }

        Self {
            speech,
            catalog,
            state,
            generation,
            viseme,
            muted: AtomicBool::new(false),
            config,
        }
    }

    /// Create an engine over a provider built by the factory.
    pub fn from_provider_kind(kind: &str, config: EngineConfig) -> EngineResult<Self> {
        let provider = create_speech_provider(kind)?;
        Ok(Self::new(Some(provider), config))
    }
}

/// Subscriber refreshing the catalog from the platform on every
/// capability-change notification. Holds the provider weakly so the
/// subscription does not keep a dropped provider alive.
fn catalog_refresher(
    speech: &Arc<dyn BaseSpeech>,
    catalog: &Arc<VoiceCatalog>,
) -> VoicesChangedCallback {
    let speech: Weak<dyn BaseSpeech> = Arc::downgrade(speech);
    let catalog = Arc::clone(catalog);
    Arc::new(move || {
        let speech = speech.clone();
        let catalog = catalog.clone();
        Box::pin(async move {
            if let Some(speech) = speech.upgrade() {
                catalog.refresh(speech.list_voices());
            } else {
                debug!("voices changed after provider drop, ignoring");
            }
        })
    })
}
