//! Periodic mouth-shape ticker for the speaking avatar.
//!
//! While a unit is audible the ticker publishes a pseudo-random non-neutral
//! shape at a fixed interval; this is a stand-in animation signal, since the
//! platform playback stream exposes no phoneme timing to analyse. Stopping
//! the ticker snaps the mouth back to neutral before returning.

use parking_lot::RwLock;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::state::{EngineState, GenerationCounter, MouthShape};

/// Owns the mouth-shape signal. Each `start` spawns a fresh ticker task
/// bound to a generation token; a tick whose token has gone stale publishes
/// nothing and exits. The token check and the shape write happen under the
/// same state lock, so a stale ticker can never overwrite the neutral snap
/// of a stop that already ran.
pub struct VisemeDriver {
    state: Arc<RwLock<EngineState>>,
    generation: Arc<GenerationCounter>,
    interval: Duration,
}

impl VisemeDriver {
    pub fn new(
        state: Arc<RwLock<EngineState>>,
        generation: Arc<GenerationCounter>,
        interval_ms: u64,
    ) -> Self {
        Self {
            state,
            generation,
            interval: Duration::from_millis(interval_ms.max(1)),
        }
    }

    /// Start ticking for the unit owning `token`, replacing any previous
    /// ticker. Must be called from within the runtime.
    pub fn start(&self, token: u64) {
        let mut state = self.state.write();
        if let Some(handle) = state.viseme_handle.take() {
            handle.abort();
        }

        let shared = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        let interval = self.interval;

        state.viseme_handle = Some(tokio::spawn(async move {
            let mut rng = SmallRng::from_entropy();
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let mut state = shared.write();
                if !generation.is_current(token) {
                    debug!("viseme ticker superseded");
                    return;
                }
                let pick = rng.gen_range(0..MouthShape::SPEAKING.len());
                state.mouth_shape = MouthShape::SPEAKING[pick];
            }
        }));
    }

    /// Stop the ticker and snap the mouth to neutral.
    pub fn stop(&self) {
        let mut state = self.state.write();
        Self::stop_locked(&mut state);
    }

    /// Variant for callers already holding the state lock.
    pub(super) fn stop_locked(state: &mut EngineState) {
        if let Some(handle) = state.viseme_handle.take() {
            handle.abort();
        }
        state.mouth_shape = MouthShape::Neutral;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn driver(interval_ms: u64) -> (VisemeDriver, Arc<RwLock<EngineState>>, Arc<GenerationCounter>)
    {
        let state = Arc::new(RwLock::new(EngineState::new()));
        let generation = Arc::new(GenerationCounter::new());
        let driver = VisemeDriver::new(Arc::clone(&state), Arc::clone(&generation), interval_ms);
        (driver, state, generation)
    }

    async fn wait_until(mut cond: impl FnMut() -> bool, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        cond()
    }

    #[tokio::test]
    async fn test_ticker_publishes_speaking_shapes() {
        let (driver, state, generation) = driver(10);
        let token = generation.bump();
        driver.start(token);

        let published = wait_until(
            || !state.read().mouth_shape.is_neutral(),
            Duration::from_secs(1),
        )
        .await;
        assert!(published, "ticker never published a speaking shape");

        driver.stop();
    }

    #[tokio::test]
    async fn test_stop_snaps_to_neutral() {
        let (driver, state, generation) = driver(10);
        let token = generation.bump();
        driver.start(token);

        wait_until(
            || !state.read().mouth_shape.is_neutral(),
            Duration::from_secs(1),
        )
        .await;

        driver.stop();
        assert!(state.read().mouth_shape.is_neutral());
        assert!(state.read().viseme_handle.is_none());
    }

    #[tokio::test]
    async fn test_stale_ticker_publishes_nothing() {
        let (driver, state, generation) = driver(10);
        let token = generation.bump();
        driver.start(token);

        // Supersede the token without going through stop; any in-flight
        // tick must leave the shape alone from here on.
        generation.bump();
        state.write().mouth_shape = MouthShape::Neutral;

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(state.read().mouth_shape.is_neutral());
    }
}
