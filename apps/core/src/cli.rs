//! Line-oriented chat shell: the transport used by the binary.

use crate::actors::router::ReplyRouter;
use crate::actors::traits::CompletionEngine;
use crate::database::{self, SqliteProfileStore};
use crate::error::AppError;
use crate::models::{ChatRequest, NewSkill, Turn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

pub const HELP_TEXT: &str = "Commands:
  /skills                          list your skills
  /skill add <name> <proficiency>  add a skill (proficiency is the last word)
  /skill rm <id>                   remove a skill
  /reset                           forget the conversation so far
  /help                            show this help
  /quit                            exit
Anything else is sent as a chat message.";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat(String),
    AddSkill { name: String, proficiency: String },
    RemoveSkill(String),
    ListSkills,
    Reset,
    Help,
    Quit,
    /// A slash command we could not understand, with a hint
    Invalid(String),
    Empty,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if !line.starts_with('/') {
        return Command::Chat(line.to_string());
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["/quit"] | ["/exit"] => Command::Quit,
        ["/help"] => Command::Help,
        ["/reset"] => Command::Reset,
        ["/skills"] => Command::ListSkills,
        ["/skill", "rm", id] => Command::RemoveSkill(id.to_string()),
        ["/skill", "add", name @ .., proficiency] if !name.is_empty() => Command::AddSkill {
            name: name.join(" "),
            proficiency: proficiency.to_string(),
        },
        ["/skill", "add", ..] => Command::Invalid("usage: /skill add <name> <proficiency>".to_string()),
        ["/skill", "rm", ..] => Command::Invalid("usage: /skill rm <id>".to_string()),
        _ => Command::Invalid(format!("unknown command '{}', try /help", words[0])),
    }
}

/// Reads stdin line by line until EOF or `/quit`, keeping the chat history in memory.
pub async fn run_chat_loop<C>(
    router: &ReplyRouter<C, SqliteProfileStore>,
    store: &SqliteProfileStore,
    user_id: &str,
) -> Result<(), AppError>
where
    C: CompletionEngine,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut history: Vec<Turn> = Vec::new();

    info!(user_id, "Chat session started");
    write_out(&mut stdout, "CareerChat ready. Type /help for commands.\n> ").await?;

    while let Some(line) = lines.next_line().await? {
        let output = match parse_command(&line) {
            Command::Quit => break,
            Command::Empty => String::new(),
            Command::Help => format!("{}\n", HELP_TEXT),
            Command::Reset => {
                history.clear();
                "Conversation cleared.\n".to_string()
            }
            Command::Invalid(hint) => format!("{}\n", hint),
            Command::ListSkills => {
                let skills = database::get_skills(store.pool(), user_id).await?;
                if skills.is_empty() {
                    "No skills added yet.\n".to_string()
                } else {
                    skills
                        .iter()
                        .map(|s| format!("  {} ({})  [{}]\n", s.name, s.proficiency, s.id))
                        .collect()
                }
            }
            Command::AddSkill { name, proficiency } => {
                match database::add_skill(store.pool(), user_id, NewSkill { name, proficiency }).await {
                    Ok(skill) => format!("Added {} ({}).\n", skill.name, skill.proficiency),
                    Err(e) => format!("Could not add skill: {}\n", e),
                }
            }
            Command::RemoveSkill(id) => {
                if database::delete_skill(store.pool(), &id).await? {
                    "Removed.\n".to_string()
                } else {
                    format!("No skill with id {}.\n", id)
                }
            }
            Command::Chat(message) => {
                let request = ChatRequest {
                    user_id: user_id.to_string(),
                    message,
                    history: history.clone(),
                };
                match router.handle_request(&request).await {
                    Ok(reply) => {
                        let text = format!("{}\n", reply.content);
                        history.push(Turn::user(request.message));
                        history.push(Turn::assistant(reply.content));
                        text
                    }
                    Err(e) => {
                        warn!("Rejected chat message: {}", e);
                        format!("{}\n", e)
                    }
                }
            }
        };

        write_out(&mut stdout, &format!("{}> ", output)).await?;
    }

    info!(user_id, turns = history.len(), "Chat session ended");
    Ok(())
}

async fn write_out(stdout: &mut tokio::io::Stdout, text: &str) -> Result<(), AppError> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
