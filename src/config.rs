//! Configuration for a [`crate::LanguageContext`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{error::Error, language::Language, storage::StorageKey};

/// Tunables for the language state and relocalization.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// let config = langswitch::Config::from_json_str(r#"{ "fallback_language": "ar" }"#)?;
/// assert_eq!(config.fallback_language, langswitch::Language::Ar);
/// # Ok::<(), langswitch::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix of the persisted keys, e.g. `langswitch.selectedLanguage`.
    pub storage_key_prefix: String,
    /// String table consulted by `localized` lookups.
    pub default_table: String,
    /// Used when the device language is not a supported language.
    pub fallback_language: Language,
    /// Duration of the root-swap transition.
    pub transition_duration_ms: u64,
    /// Whether `localized` also localizes numbers.
    pub localize_numbers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_key_prefix: "langswitch".to_string(),
            default_table: "Localizable".to_string(),
            fallback_language: Language::En,
            transition_duration_ms: 500,
            localize_numbers: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        serde_json::from_str(s).map_err(Error::Parse)
    }

    pub fn with_storage_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_key_prefix = prefix.into();
        self
    }

    pub fn with_default_table(mut self, table: impl Into<String>) -> Self {
        self.default_table = table.into();
        self
    }

    pub fn with_fallback_language(mut self, language: Language) -> Self {
        self.fallback_language = language;
        self
    }

    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn with_localize_numbers(mut self, localize_numbers: bool) -> Self {
        self.localize_numbers = localize_numbers;
        self
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    /// Full storage key for `key`.
    pub fn storage_key(&self, key: StorageKey) -> String {
        if self.storage_key_prefix.is_empty() {
            key.name().to_string()
        } else {
            format!("{}.{}", self.storage_key_prefix, key.name())
        }
    }
}
