use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::models::ChatTurn;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// An error originating from the completion engine.
    #[error("LLM request failed: {0}")]
    LlmError(String),
    /// An error originating from the skill profile store.
    #[error("Profile lookup failed: {0}")]
    ProfileError(String),
    /// A generic internal error within an actor.
    #[error("Internal system error: {0}")]
    Internal(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the completion actor.
#[derive(Debug)]
pub enum CompletionMessage {
    /// A request to complete a conversation.
    Complete {
        conversation: Vec<ChatTurn>,
        /// A channel to send the parsed engine response back.
        responder: oneshot::Sender<Result<CompletionResponse, AppError>>,
    },
}

/// Body of a `generateContent`-style completion response.
///
/// Every level is optional so that an odd but well-formed body reads as
/// "no usable candidate" instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<ContentPart>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

impl CompletionResponse {
    /// A response holding a single candidate with one text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![ContentPart {
                        text: Some(text.into()),
                    }]),
                }),
            }]),
        }
    }

    /// Text of the first candidate, its parts concatenated. Other candidates are ignored.
    pub fn first_candidate_text(&self) -> Option<String> {
        let parts = self
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?;

        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if parts.iter().all(|p| p.text.is_none()) {
            return None;
        }
        Some(text)
    }
}
