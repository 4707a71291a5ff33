//! Message Analyzer - runs every non-LLM check on one incoming message.
//!
//! Normalization, intent classification, language hint and directive extraction
//! have no ordering dependency on each other; they all read the same input.

use serde::Serialize;

use super::directives::{extract_directives, ResponseDirectives};
use super::intent::{Intent, IntentClassifier, IntentResult};
use super::language::{detect_language, LanguageHint};
use super::normalizer::normalize;

/// Everything known about a message before any collaborator is called.
#[derive(Debug, Clone, Serialize)]
pub struct MessageAnalysis {
    /// The message exactly as the user typed it
    pub raw: String,
    /// Lower-cased, trimmed copy used for pattern matching
    pub normalized: String,
    pub intent: IntentResult,
    pub language: LanguageHint,
    pub directives: ResponseDirectives,
}

impl MessageAnalysis {
    pub fn intent(&self) -> Intent {
        self.intent.intent
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Intent: {} (rule: {}), Language: {}, Brief: {}, Single line: {}",
            self.intent.intent,
            self.intent.rule.unwrap_or("fallback"),
            self.language.code(),
            self.directives.brief,
            self.directives.single_sentence,
        )
    }
}

/// Stateless analyzer; one instance can be shared by every request.
pub struct MessageAnalyzer {
    intent_classifier: IntentClassifier,
}

impl Default for MessageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageAnalyzer {
    pub fn new() -> Self {
        Self {
            intent_classifier: IntentClassifier::new(),
        }
    }

    /// Analyze a raw message
    pub fn analyze(&self, raw: &str) -> MessageAnalysis {
        let normalized = normalize(raw);

        MessageAnalysis {
            intent: self.intent_classifier.classify(&normalized),
            // Script detection works on the untouched text
            language: detect_language(raw),
            directives: extract_directives(&normalized),
            raw: raw.to_string(),
            normalized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_definition() {
        let analyzer = MessageAnalyzer::new();

        let analysis = analyzer.analyze("Explain recursion");
        assert_eq!(analysis.intent(), Intent::DefinitionRequest);
        assert_eq!(analysis.language, LanguageHint::Default);
        assert_eq!(analysis.raw, "Explain recursion");
        assert_eq!(analysis.normalized, "explain recursion");
    }

    #[test]
    fn test_telugu_definition() {
        let analyzer = MessageAnalyzer::new();

        let analysis = analyzer.analyze("రస్ట్ గురించి Cheppu");
        assert_eq!(analysis.intent(), Intent::DefinitionRequest);
        assert_eq!(analysis.language, LanguageHint::AlternateScript);
    }

    #[test]
    fn test_summary() {
        let analyzer = MessageAnalyzer::new();
        let summary = analyzer.analyze("how do i grow as a backend dev, keep it short").summary();

        assert!(summary.contains("Intent: career_advice"));
        assert!(summary.contains("rule: fallback"));
        assert!(summary.contains("Brief: true"));
    }
}
