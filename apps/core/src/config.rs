//! Runtime configuration read from the environment (and `.env` when present).

use crate::error::AppError;
use std::env;
use std::time::Duration;
use url::Url;

// --- Constants ---
pub const DEFAULT_COMPLETION_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_COMPLETION_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://careerchat.sqlite";
pub const DEFAULT_USER_ID: &str = "local-user";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
    Bunyan,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "bunyan" => Ok(LogFormat::Bunyan),
            other => Err(AppError::Config(format!(
                "LOG_FORMAT must be one of pretty, json, bunyan (got '{}')",
                other
            ))),
        }
    }
}

/// Settings for the HTTP completion engine.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl CompletionConfig {
    /// Full `generateContent` endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub completion: CompletionConfig,
    pub database_url: String,
    pub user_id: String,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        // A missing .env file is fine; variables may come from the real environment.
        let _ = dotenv::dotenv();
        Self::from_vars()
    }

    /// Reads the process environment only.
    pub fn from_vars() -> Result<Self, AppError> {
        let api_key = env::var("COMPLETION_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Config("COMPLETION_API_KEY is not set".to_string()))?;

        let base_url = Url::parse(&var_or("COMPLETION_API_URL", DEFAULT_COMPLETION_API_URL))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "COMPLETION_API_URL must use http or https (got '{}')",
                base_url.scheme()
            )));
        }

        let timeout_secs = match env::var("COMPLETION_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "COMPLETION_TIMEOUT_SECS must be a positive integer (got '{}')",
                        raw
                    ))
                })?,
            Err(_) => DEFAULT_COMPLETION_TIMEOUT_SECS,
        };

        let log_format = var_or("LOG_FORMAT", "pretty").parse::<LogFormat>()?;

        Ok(Self {
            completion: CompletionConfig {
                base_url,
                api_key,
                model: var_or("COMPLETION_MODEL", DEFAULT_COMPLETION_MODEL),
                timeout: Duration::from_secs(timeout_secs),
            },
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            user_id: var_or("CHAT_USER_ID", DEFAULT_USER_ID),
            log_format,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
