//! Configuration types for the speech engine.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Application language code -> platform locale tag, for every language the
/// tutoring client supports. Configuration data external to the engine;
/// this table is the shipped default.
static DEFAULT_LOCALE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("en", "en-US"),
        ("es", "es-ES"),
        ("fr", "fr-FR"),
        ("de", "de-DE"),
        ("hi", "hi-IN"),
        ("zh", "zh-CN"),
        ("ja", "ja-JP"),
        ("pt", "pt-BR"),
        ("ar", "ar-SA"),
        ("ru", "ru-RU"),
    ])
});

/// Configuration for the speech engine
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Application language assumed when a request carries no locale.
    pub default_language: String,
    /// Period of the mouth-shape animation signal (ms).
    pub viseme_interval_ms: u64,
    /// Application language code -> platform locale tag.
    pub locale_map: HashMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            viseme_interval_ms: 120,
            locale_map: DEFAULT_LOCALE_MAP
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Resolve an application language code through the locale table. Tags
    /// not in the table (already-full locale tags, unknown codes) pass
    /// through unchanged and are left to the platform to interpret.
    pub fn resolve_locale(&self, tag: &str) -> String {
        self.locale_map
            .get(tag)
            .cloned()
            .unwrap_or_else(|| tag.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_maps_application_codes() {
        let config = EngineConfig::default();
        assert_eq!(config.resolve_locale("en"), "en-US");
        assert_eq!(config.resolve_locale("hi"), "hi-IN");
    }

    #[test]
    fn test_resolve_passes_full_tags_through() {
        let config = EngineConfig::default();
        assert_eq!(config.resolve_locale("en-GB"), "en-GB");
        assert_eq!(config.resolve_locale("xx"), "xx");
    }

    #[test]
    fn test_custom_map_overrides_default() {
        let config = EngineConfig {
            locale_map: HashMap::from([("en".to_string(), "en-AU".to_string())]),
            ..Default::default()
        };
        assert_eq!(config.resolve_locale("en"), "en-AU");
    }
}
