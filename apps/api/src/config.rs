use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::CompletionOptions;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    /// Base URL of an OpenAI-compatible chat-completions endpoint.
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub llm_timeout_secs: u64,
    /// Resume text is truncated to this many characters before prompting.
    pub max_resume_chars: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_base_url: env_or("LLM_BASE_URL", "https://api.groq.com/openai/v1"),
            llm_model: env_or("LLM_MODEL", "llama-3.3-70b-versatile"),
            llm_temperature: parse_env("LLM_TEMPERATURE", 0.3)?,
            llm_max_tokens: parse_env("LLM_MAX_TOKENS", 1500)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 30)?,
            max_resume_chars: parse_env("MAX_RESUME_CHARS", 3000)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Completion options derived from the LLM_* tuning variables.
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: self.llm_temperature,
            max_tokens: self.llm_max_tokens,
            timeout: Duration::from_secs(self.llm_timeout_secs),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid value")),
        Err(_) => Ok(default),
    }
}
