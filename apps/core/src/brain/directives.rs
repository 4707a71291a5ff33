//! Response-shaping directives (brevity, single line).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Any word starting with "short" or "brief": short, shorter, shortly, brief, briefly...
static BREVITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(short|brief)\w*").expect("Invalid regex: brevity words"));

// Substring match, so "oneliner" and "single-line" count too.
static SINGLE_LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(one|single)[\s-]*line").expect("Invalid regex: single line phrases"));

/// Independent, non-exclusive response shape flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDirectives {
    pub brief: bool,
    pub single_sentence: bool,
}

impl ResponseDirectives {
    /// Number of directives that fired.
    pub fn count(&self) -> usize {
        usize::from(self.brief) + usize::from(self.single_sentence)
    }
}

/// Test normalized text for both directives.
pub fn extract_directives(normalized: &str) -> ResponseDirectives {
    ResponseDirectives {
        brief: BREVITY_PATTERN.is_match(normalized),
        single_sentence: SINGLE_LINE_PATTERN.is_match(normalized),
    }
}
