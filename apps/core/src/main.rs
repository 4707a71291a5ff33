// CareerChat Backend Entry Point
// "The Brain" - decides between canned replies and completion-engine calls

mod actors;
mod brain;
mod cli;
mod config;
mod database;
mod error;
mod models;
mod telemetry;

#[cfg(test)]
mod tests;

use actors::llm::CompletionActorHandle;
use actors::router::ReplyRouter;
use config::AppConfig;
use database::SqliteProfileStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(config.log_format);

    info!(
        model = %config.completion.model,
        database = %config.database_url,
        "Starting CareerChat"
    );

    let pool = database::init_db(&config.database_url).await?;
    let store = Arc::new(SqliteProfileStore::new(pool));
    let completion = Arc::new(CompletionActorHandle::new(config.completion.clone()));
    let router = ReplyRouter::new(completion, store.clone());

    cli::run_chat_loop(&router, &store, &config.user_id).await?;

    info!("CareerChat stopped");
    Ok(())
}
