use std::str::FromStr;

use anyhow::{Context, Result};

use crate::analysis::pipeline::AnalysisSettings;
use crate::analysis::prompt_builder::MAX_RESUME_CHARS;
use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS};

/// Default number of extra compare-and-swap attempts for a stats fold.
pub const DEFAULT_STATS_RETRY_BUDGET: u32 = 5;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL URL. When unset the service runs on the in-memory store.
    pub database_url: Option<String>,
    pub openai_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_timeout_secs: u64,
    pub max_resume_chars: usize,
    pub stats_retry_budget: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            openai_api_key: require_env("OPENAI_API_KEY")?,
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_temperature: parse_env("LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            max_resume_chars: parse_env("MAX_RESUME_CHARS", MAX_RESUME_CHARS)?,
            stats_retry_budget: parse_env("STATS_RETRY_BUDGET", DEFAULT_STATS_RETRY_BUDGET)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Per-request knobs handed to the analysis pipeline and optimizer.
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            model: self.llm_model.clone(),
            temperature: self.llm_temperature,
            max_resume_chars: self.max_resume_chars,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
