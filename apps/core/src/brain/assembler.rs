//! Context assembly: turns an analysis and a skill snapshot into the text sent
//! to the completion engine.
//!
//! Precedence of the system context:
//! 1. Telugu script + definition request
//! 2. definition request
//! 3. career advice with the rendered skill list
//!
//! Directive lines are then appended in a fixed order: brevity, single line,
//! and the Telugu reply line. The Telugu reply line is skipped for definition
//! requests because their system context already names the language.

use serde::Serialize;

use super::analyzer::MessageAnalysis;
use super::directives::ResponseDirectives;
use super::intent::Intent;
use super::language::LanguageHint;
use crate::models::Skill;

pub const NO_SKILLS_PLACEHOLDER: &str = "No skills added yet";
pub const BREVITY_LINE: &str = "Keep the answer short and concise.";
pub const SINGLE_LINE_LINE: &str = "Answer in a single line.";
pub const TELUGU_REPLY_LINE: &str = "Respond in Telugu, but stay focused on career guidance.";

/// System context plus the user turn that will actually be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptContext {
    pub system_context: String,
    pub final_message: String,
}

/// Render a skill snapshot as `name (proficiency), ...`.
pub fn render_skills(skills: &[Skill]) -> String {
    if skills.is_empty() {
        return NO_SKILLS_PLACEHOLDER.to_string();
    }

    skills
        .iter()
        .map(|skill| format!("{} ({})", skill.name, skill.proficiency))
        .collect::<Vec<_>>()
        .join(", ")
}

fn definition_context(language: LanguageHint) -> String {
    format!(
        "The user is asking for a definition or explanation. Respond in {} with a clear and simple explanation.",
        language.name()
    )
}

fn career_context(skills: &[Skill]) -> String {
    format!(
        "You are a helpful career guidance assistant. The user's current skills are: {}. Give practical, personalized career advice based on these skills.",
        render_skills(skills)
    )
}

/// Build the system context and final message.
pub fn assemble_context(
    intent: Intent,
    language: LanguageHint,
    directives: ResponseDirectives,
    skills: &[Skill],
    raw_message: &str,
) -> PromptContext {
    let is_definition = intent == Intent::DefinitionRequest;

    let system_context = if is_definition {
        definition_context(language)
    } else {
        career_context(skills)
    };

    let mut lines = vec![system_context.clone(), format!("User: {}", raw_message)];
    if directives.brief {
        lines.push(BREVITY_LINE.to_string());
    }
    if directives.single_sentence {
        lines.push(SINGLE_LINE_LINE.to_string());
    }
    if language.is_alternate() && !is_definition {
        lines.push(TELUGU_REPLY_LINE.to_string());
    }

    PromptContext {
        system_context,
        final_message: lines.join("\n"),
    }
}

/// Convenience wrapper over [`assemble_context`] for an analyzed message.
pub fn assemble(analysis: &MessageAnalysis, skills: &[Skill]) -> PromptContext {
    assemble_context(
        analysis.intent(),
        analysis.language,
        analysis.directives,
        skills,
        &analysis.raw,
    )
}
