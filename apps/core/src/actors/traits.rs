use crate::actors::messages::{AppError, CompletionResponse};
use crate::models::{ChatTurn, Skill};
use async_trait::async_trait;

/// Defines the public interface for the generative completion engine.
///
/// This trait abstracts the specific backend, allowing the networked engine to be
/// swapped for a scripted one in tests. Calls are single-shot: no retry, no streaming.
#[async_trait]
pub trait CompletionEngine: Send + Sync + 'static {
    /// Completes an ordered `{role, content}` conversation whose last entry is the new user turn.
    async fn complete(&self, conversation: Vec<ChatTurn>) -> Result<CompletionResponse, AppError>;
}

/// Defines the public interface for the skill profile store.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Returns the user's skills in insertion order; an unknown user has none.
    async fn fetch_skills(&self, user_id: &str) -> Result<Vec<Skill>, AppError>;
}

/// Source of randomness for picking a canned reply.
pub trait ReplySelector: Send + Sync + 'static {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}
