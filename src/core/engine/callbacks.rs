//! Callback types for the speech engine.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Callback invoked when a speak request completes. Fires exactly once per
/// request: on full queue drain, or immediately when the request degrades
/// synchronously (muted, no capability, empty input). A request that is
/// cancelled or pre-empted never fires its callback.
pub type SpeakEndCallback =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Wrap a plain async closure as a [`SpeakEndCallback`].
pub fn on_end<F, Fut>(callback: F) -> SpeakEndCallback
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move || Box::pin(callback()))
}
