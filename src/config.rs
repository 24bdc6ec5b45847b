//! Environment-sourced configuration.
//!
//! All settings come from environment variables (optionally populated from a
//! `.env` file by the binary). There is no config file and no persisted
//! state.

use anyhow::{Context, Result};

/// Shown on the menu keyboard when `REPOSITORY_URL` is not set.
const DEFAULT_REPOSITORY_URL: &str = "https://github.com";

/// Process configuration, one field per environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram Bot API token (`TELEGRAM_BOT_TOKEN`).
    pub telegram_bot_token: String,
    /// Unsplash access key sent as `Client-ID` (`UNSPLASH_API_TOKEN`).
    pub unsplash_api_token: String,
    /// Freesound static API token used for text search (`FREESOUND_API_TOKEN`).
    pub freesound_api_token: String,
    /// Freesound OAuth bearer token used for downloads (`FREESOUND_OAUTH_TOKEN`).
    pub freesound_oauth_token: String,
    /// Link rendered on the menu keyboard (`REPOSITORY_URL`).
    pub repository_url: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable if a required one is missing
    /// or blank.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration through a custom env resolver.
    ///
    /// Takes a resolver function for testability (avoids unsafe `set_var`
    /// in tests).
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable if a required one is missing
    /// or blank.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            telegram_bot_token: require(&env, "TELEGRAM_BOT_TOKEN")?,
            unsplash_api_token: require(&env, "UNSPLASH_API_TOKEN")?,
            freesound_api_token: require(&env, "FREESOUND_API_TOKEN")?,
            freesound_oauth_token: require(&env, "FREESOUND_OAUTH_TOKEN")?,
            repository_url: env("REPOSITORY_URL")
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_REPOSITORY_URL.to_owned()),
        })
    }
}

/// Fetch a required variable, trimming whitespace and rejecting blanks.
fn require(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    env(key)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .with_context(|| format!("missing required environment variable {key}"))
}
