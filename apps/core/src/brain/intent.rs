//! Intent classification using regex patterns.
//!
//! Rules are held in an explicit priority list and evaluated first-match-wins:
//! appreciation, then definition request. Anything left over is career advice,
//! so classification is total.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Thanks or approval ("thanks", "great job", "ok")
    Appreciation,
    /// Asks what something is ("explain recursion", "rust gurinchi cheppu")
    DefinitionRequest,
    /// Everything else: career guidance grounded in the user's skills
    CareerAdvice,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Appreciation => "appreciation",
            Intent::DefinitionRequest => "definition_request",
            Intent::CareerAdvice => "career_advice",
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Name of the rule that fired, `None` when the fallback was used
    pub rule: Option<&'static str>,
    /// Text fragment that matched the rule
    pub matched: Option<String>,
}

/// One entry of the ordered rule list.
pub struct IntentRule {
    pub name: &'static str,
    pub intent: Intent,
    patterns: &'static [Regex],
}

impl IntentRule {
    fn find(&self, text: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.find(text))
            .map(|m| m.as_str().to_string())
    }
}

// Compile patterns once at startup
static APPRECIATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(thanks|thank\s+you|thankyou|thx|ty|dhanyavadalu)\b").expect("Invalid regex: gratitude words"),
        Regex::new(r"\b(great\s+job|good\s+job|well\s+done|awesome|nice|cool|perfect|super|excellent)\b").expect("Invalid regex: approval words"),
        Regex::new(r"\b(ok|okay)\b").expect("Invalid regex: acknowledgement words"),
    ]
});

static TRANSLITERATED_DEFINITION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(cheppu|cheppandi|gurinchi)\b").expect("Invalid regex: Telugu tell-me words"),
        Regex::new(r"\bante\s+(enti|emiti)\b").expect("Invalid regex: Telugu what-is phrases"),
    ]
});

static ENGLISH_DEFINITION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(what\s+is|what\s+are|what['’]s|whats)\b").expect("Invalid regex: English what-is phrases"),
        Regex::new(r"\b(define|definition\s+of|meaning\s+of)\b").expect("Invalid regex: English definition phrases"),
        Regex::new(r"\b(explain|describe|tell\s+me\s+about)\b").expect("Invalid regex: English explanation verbs"),
    ]
});

/// Intent classifier over an ordered rule list.
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a new intent classifier with all rules, highest priority first
    pub fn new() -> Self {
        let rules = vec![
            IntentRule {
                name: "appreciation",
                intent: Intent::Appreciation,
                patterns: APPRECIATION_PATTERNS.as_slice(),
            },
            IntentRule {
                name: "transliterated_definition",
                intent: Intent::DefinitionRequest,
                patterns: TRANSLITERATED_DEFINITION_PATTERNS.as_slice(),
            },
            IntentRule {
                name: "english_definition",
                intent: Intent::DefinitionRequest,
                patterns: ENGLISH_DEFINITION_PATTERNS.as_slice(),
            },
        ];

        Self { rules }
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Classify normalized text. The first rule with a matching pattern wins.
    pub fn classify(&self, normalized: &str) -> IntentResult {
        for rule in &self.rules {
            if let Some(matched) = rule.find(normalized) {
                return IntentResult {
                    intent: rule.intent,
                    rule: Some(rule.name),
                    matched: Some(matched),
                };
            }
        }

        IntentResult {
            intent: Intent::CareerAdvice,
            rule: None,
            matched: None,
        }
    }
}
