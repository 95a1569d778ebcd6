//! Translation direction.

use crate::script::contains_kana;
use std::fmt;

/// Provider language code for Japanese.
pub const JAPANESE: &str = "JA";
/// Provider language code for English.
pub const ENGLISH: &str = "EN";

/// Ordered (source, target) language codes sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: &'static str,
    pub target: &'static str,
}

impl LanguagePair {
    pub const JA_TO_EN: Self = Self {
        source: JAPANESE,
        target: ENGLISH,
    };
    pub const EN_TO_JA: Self = Self {
        source: ENGLISH,
        target: JAPANESE,
    };

    /// Map the kana detector result to a direction.
    pub fn route(has_kana: bool) -> Self {
        if has_kana {
            Self::JA_TO_EN
        } else {
            Self::EN_TO_JA
        }
    }

    /// Pick the direction for a piece of inbound text.
    pub fn for_text(text: &str) -> Self {
        Self::route(contains_kana(text))
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
