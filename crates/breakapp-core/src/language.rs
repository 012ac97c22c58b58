//! Supported conversation languages.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A language the ordering assistant can converse in.
///
/// Arabic is the default: unknown codes fall back to it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
pub enum Language {
    #[default]
    #[serde(rename = "ar")]
    #[strum(serialize = "ar")]
    Arabic,
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
}

impl Language {
    /// Resolves a language code such as `en`, `EN-us` or `ar_SA`.
    ///
    /// Anything unrecognised resolves to [`Language::Arabic`].
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        primary.parse().unwrap_or_default()
    }

    /// Returns the ISO 639-1 code.
    pub fn code(&self) -> &str {
        self.as_ref()
    }
}
