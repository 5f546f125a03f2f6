//! Voice catalog snapshots and best-match voice selection.

use parking_lot::RwLock;
use tracing::debug;

use crate::core::speech::VoiceDescriptor;

use super::segment::Gender;

/// Holds the latest snapshot of the voices the platform offers. The engine
/// refreshes it once at startup and again on every capability-change
/// notification; selection always reads the latest snapshot.
#[derive(Debug, Default)]
pub struct VoiceCatalog {
    voices: RwLock<Vec<VoiceDescriptor>>,
}

impl VoiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh snapshot, discarding the previous one.
    pub fn refresh(&self, voices: Vec<VoiceDescriptor>) {
        debug!(count = voices.len(), "voice catalog refreshed");
        *self.voices.write() = voices;
    }

    pub fn snapshot(&self) -> Vec<VoiceDescriptor> {
        self.voices.read().clone()
    }

    pub fn len(&self) -> usize {
        self.voices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.read().is_empty()
    }
}

fn primary_subtag(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Pick the best voice for `target_locale` from a catalog snapshot.
///
/// Two-pass policy:
/// 1. Keep only voices whose primary language subtag matches the target's.
/// 2. Within a candidate set, an exact full-locale match wins, else the
///    first candidate, else no voice (the platform default is used).
/// 3. A gender hint narrows the set to voices whose label contains the hint
///    word (case-insensitive); if that narrower set is empty the hint is
///    dropped, so locale correctness always wins over gender.
pub fn select_voice(
    voices: &[VoiceDescriptor],
    target_locale: &str,
    gender: Option<Gender>,
) -> Option<VoiceDescriptor> {
    let target_primary = primary_subtag(target_locale);
    let in_locale: Vec<&VoiceDescriptor> = voices
        .iter()
        .filter(|v| primary_subtag(&v.locale).eq_ignore_ascii_case(target_primary))
        .collect();

    let best_of = |candidates: &[&VoiceDescriptor]| -> Option<VoiceDescriptor> {
        candidates
            .iter()
            .find(|v| v.locale.eq_ignore_ascii_case(target_locale))
            .or_else(|| candidates.first())
            .map(|v| (*v).clone())
    };

    if let Some(gender) = gender {
        let hint = gender.as_str();
        let gendered: Vec<&VoiceDescriptor> = in_locale
            .iter()
            .filter(|v| v.label.to_ascii_lowercase().contains(hint))
            .copied()
            .collect();
        if !gendered.is_empty() {
            return best_of(&gendered);
        }
    }

    best_of(&in_locale)
}
