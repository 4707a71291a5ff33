//! Conversation building for the completion engine.

use serde::Serialize;

use super::assembler::PromptContext;
use crate::models::{ChatTurn, Speaker, Turn};

/// The unit handed to the completion engine. Built fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledPrompt {
    pub system_context: String,
    pub final_message: String,
    pub conversation: Vec<ChatTurn>,
}

impl AssembledPrompt {
    pub fn new(context: PromptContext, prior_turns: &[Turn]) -> Self {
        let conversation = build_conversation(prior_turns, &context.final_message);
        Self {
            system_context: context.system_context,
            final_message: context.final_message,
            conversation,
        }
    }
}

/// Map prior turns to `{role, content}` pairs in order and append the new user turn.
///
/// History is neither filtered nor truncated here.
pub fn build_conversation(prior_turns: &[Turn], final_message: &str) -> Vec<ChatTurn> {
    let mut conversation: Vec<ChatTurn> = prior_turns
        .iter()
        .map(|turn| ChatTurn {
            role: turn.speaker,
            content: turn.text.clone(),
        })
        .collect();

    conversation.push(ChatTurn {
        role: Speaker::User,
        content: final_message.to_string(),
    });

    conversation
}
