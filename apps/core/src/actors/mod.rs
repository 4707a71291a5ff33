//! Collaborator seams and the reply router.
//!
//! - `traits`: capability interfaces for the completion engine, the profile store
//!   and the random source
//! - `llm`: HTTP completion actor
//! - `router`: classifies, then short-circuits or delegates

pub mod llm;
pub mod messages;
pub mod router;
pub mod selector;
pub mod traits;
