//! # Brain Module
//!
//! Fast, non-LLM decision layer for CareerChat.
//! Analyzes user input BEFORE calling the completion engine and decides whether
//! a canned reply is enough.
//!
//! ## Components
//! - `normalizer`: lower-case/trim copy used for matching
//! - `intent`: ordered regex rules (appreciation, definition, career advice)
//! - `language`: Telugu script hint
//! - `directives`: brevity and single-line requests
//! - `analyzer`: runs the four checks above on one message
//! - `assembler`: system context and final message
//! - `conversation`: `{role, content}` history for the completion engine

pub mod analyzer;
pub mod assembler;
pub mod conversation;
pub mod directives;
pub mod intent;
pub mod language;
pub mod normalizer;

// Re-export main types for convenience
#[allow(unused_imports)]
pub use analyzer::{MessageAnalysis, MessageAnalyzer};
#[allow(unused_imports)]
pub use assembler::{assemble, assemble_context, render_skills, PromptContext};
#[allow(unused_imports)]
pub use conversation::{build_conversation, AssembledPrompt};
#[allow(unused_imports)]
pub use directives::{extract_directives, ResponseDirectives};
#[allow(unused_imports)]
pub use intent::{Intent, IntentClassifier, IntentResult};
#[allow(unused_imports)]
pub use language::{detect_language, LanguageHint};
#[allow(unused_imports)]
pub use normalizer::normalize;
