//! Speak-request input types and normalization.

/// One language-tagged unit of text queued for sequential playback.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SpeechSegment {
    text: String,
    lang: String,
}

impl SpeechSegment {
    /// Build a segment, trimming surrounding whitespace. Returns `None` for
    /// empty or whitespace-only text; such segments are dropped from
    /// requests rather than queued.
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            text: trimmed.to_string(),
            lang: lang.into(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Application language code or full locale tag, as given by the caller.
    pub fn lang(&self) -> &str {
        &self.lang
    }
}

/// The text payload of one speak request: a single annotated string, or a
/// caller-ordered segment list for mixed-language utterances.
#[derive(Debug, Clone)]
pub enum SpeakInput {
    Text(String),
    Segments(Vec<SpeechSegment>),
}

impl From<&str> for SpeakInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SpeakInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<SpeechSegment>> for SpeakInput {
    fn from(segments: Vec<SpeechSegment>) -> Self {
        Self::Segments(segments)
    }
}

/// Voice gender preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The hint word matched against voice labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// A caller-supplied voice preference: either a locale tag or a gender word.
/// Gender hints apply uniformly to every segment of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceHint {
    Locale(String),
    Gender(Gender),
}

impl VoiceHint {
    /// Interpret a raw locale-or-gender string: `"male"`/`"female"`
    /// (case-insensitive) select a gender, anything else is a locale tag.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "male" => Self::Gender(Gender::Male),
            "female" => Self::Gender(Gender::Female),
            _ => Self::Locale(raw.to_string()),
        }
    }

    pub fn gender(&self) -> Option<Gender> {
        match self {
            Self::Gender(gender) => Some(*gender),
            Self::Locale(_) => None,
        }
    }

    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::Locale(tag) => Some(tag),
            Self::Gender(_) => None,
        }
    }
}

/// Normalize a speak request into its ordered segment list. Single-text
/// input is annotated with `default_lang`; whitespace-only segments are
/// dropped; order is preserved.
pub fn normalize_input(input: SpeakInput, default_lang: &str) -> Vec<SpeechSegment> {
    match input {
        SpeakInput::Text(text) => SpeechSegment::new(text, default_lang).into_iter().collect(),
        SpeakInput::Segments(segments) => segments
            .into_iter()
            .filter_map(|s| SpeechSegment::new(s.text, s.lang))
            .collect(),
    }
}
