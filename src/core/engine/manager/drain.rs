//! The drain task: plays one request's segments strictly in order.
//!
//! One drain task exists per accepted request. It pops the head segment,
//! resolves a voice for it, hands it to the platform, and consumes that
//! unit's lifecycle before touching the next segment, so units never
//! overlap.
//! Every step re-checks the generation token, so a drain superseded by a
//! newer request, a cancel, or mute-entry goes quiet without side effects.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::speech::{BaseSpeech, UnitEvent};

use super::super::catalog::{VoiceCatalog, select_voice};
use super::super::config::EngineConfig;
use super::super::segment::{Gender, SpeechSegment};
use super::super::state::{EngineState, GenerationCounter};
use super::super::viseme::VisemeDriver;

/// Everything a drain task needs, cloned out of the engine at spawn time.
pub(super) struct DrainContext {
    pub(super) speech: Arc<dyn BaseSpeech>,
    pub(super) catalog: Arc<VoiceCatalog>,
    pub(super) state: Arc<RwLock<EngineState>>,
    pub(super) generation: Arc<GenerationCounter>,
    pub(super) viseme: Arc<VisemeDriver>,
    pub(super) config: EngineConfig,
    pub(super) gender: Option<Gender>,
}

pub(super) fn spawn_drain_task(ctx: DrainContext, token: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        drain(ctx, token).await;
    })
}

async fn drain(ctx: DrainContext, token: u64) {
    loop {
        let segment = {
            let mut state = ctx.state.write();
            if !ctx.generation.is_current(token) {
                return;
            }
            state.queue.pop_front()
        };
        let Some(segment) = segment else { break };

        play_unit(&ctx, token, &segment).await;

        if !ctx.generation.is_current(token) {
            return;
        }
    }
    finish(&ctx, token).await;
}

/// Play one segment through the platform and wait out its lifecycle.
/// Playback errors are logged and treated as the unit's end; a single
/// broken segment never aborts the rest of the queue.
async fn play_unit(ctx: &DrainContext, token: u64, segment: &SpeechSegment) {
    let locale = ctx.config.resolve_locale(segment.lang());
    let voice = select_voice(&ctx.catalog.snapshot(), &locale, ctx.gender);
    debug!(
        text = segment.text(),
        locale = %locale,
        voice = ?voice.as_ref().map(|v| v.name.as_str()),
        "starting unit"
    );

    let mut handle = match ctx.speech.speak(segment.text(), voice.as_ref(), &locale).await {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "unit failed to start, skipping");
            return;
        }
    };

    loop {
        if !ctx.generation.is_current(token) {
            return;
        }
        match handle.next_event().await {
            Some(UnitEvent::Started) => {
                debug!("unit audible");
                ctx.viseme.start(token);
            }
            Some(UnitEvent::Ended) | None => return,
            Some(UnitEvent::Errored(reason)) => {
                warn!(reason = %reason, "unit playback error, skipping");
                return;
            }
        }
    }
}

/// Commit the request's completion: flip to idle and fire the stored
/// callback exactly once. The token is re-checked and retired under the
/// state lock, so a concurrent cancel or newer request makes this a no-op
/// and late platform events cannot resurrect the finished request.
async fn finish(ctx: &DrainContext, token: u64) {
    let callback = {
        let mut state = ctx.state.write();
        if !ctx.generation.is_current(token) {
            return;
        }
        ctx.generation.bump();
        VisemeDriver::stop_locked(&mut state);
        state.is_speaking = false;
        state.drain_handle = None;
        state.on_end.take()
    };

    debug!("speak request drained");
    if let Some(callback) = callback {
        callback().await;
    }
}
