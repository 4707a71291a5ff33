//! Script-range language hint.
//!
//! Only answers one question: does the raw message contain Telugu script?

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Unicode block for Telugu.
pub const TELUGU_BLOCK: RangeInclusive<char> = '\u{0C00}'..='\u{0C7F}';

/// Detected language hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageHint {
    /// No Telugu characters, answer in English
    Default,
    /// At least one Telugu character
    AlternateScript,
}

impl LanguageHint {
    /// Returns the language code
    pub fn code(&self) -> &'static str {
        match self {
            LanguageHint::Default => "en",
            LanguageHint::AlternateScript => "te",
        }
    }

    /// Language name as written into prompts
    pub fn name(&self) -> &'static str {
        match self {
            LanguageHint::Default => "English",
            LanguageHint::AlternateScript => "Telugu",
        }
    }

    pub fn is_alternate(&self) -> bool {
        matches!(self, LanguageHint::AlternateScript)
    }
}

/// Scan the original (non-normalized) message for Telugu code points.
pub fn detect_language(raw: &str) -> LanguageHint {
    if raw.chars().any(|c| TELUGU_BLOCK.contains(&c)) {
        LanguageHint::AlternateScript
    } else {
        LanguageHint::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_is_default() {
        assert_eq!(detect_language("Explain recursion"), LanguageHint::Default);
        assert_eq!(detect_language(""), LanguageHint::Default);
    }

    #[test]
    fn test_single_telugu_char_is_enough() {
        assert_eq!(detect_language("what is ఆ"), LanguageHint::AlternateScript);
        assert_eq!(detect_language("రస్ట్ గురించి cheppu"), LanguageHint::AlternateScript);
    }

    #[test]
    fn test_block_edges() {
        assert_eq!(detect_language("\u{0C00}"), LanguageHint::AlternateScript);
        assert_eq!(detect_language("\u{0C7F}"), LanguageHint::AlternateScript);
        // Neighbouring Tamil and Kannada blocks do not count
        assert_eq!(detect_language("\u{0BFF}"), LanguageHint::Default);
        assert_eq!(detect_language("\u{0C80}"), LanguageHint::Default);
    }

    #[test]
    fn test_other_indic_scripts_are_default() {
        assert_eq!(detect_language("नमस्ते"), LanguageHint::Default);
        assert_eq!(detect_language("ನಮಸ್ಕಾರ"), LanguageHint::Default);
    }

    #[test]
    fn test_codes() {
        assert_eq!(LanguageHint::Default.code(), "en");
        assert_eq!(LanguageHint::AlternateScript.code(), "te");
        assert_eq!(LanguageHint::AlternateScript.name(), "Telugu");
    }
}
