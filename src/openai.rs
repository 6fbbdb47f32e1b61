//! OpenAI-compatible client configuration.
//!
//! OpenAI, the Hugging Face router and Ollama all speak the chat-completions
//! protocol, so a single `async_openai` client covers them; only the base URL
//! and key differ.

use crate::config::ModelSettings;
use crate::error::{LadleError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Placeholder key accepted by Ollama.
pub const OLLAMA_API_KEY: &str = "ollama";

/// Resolve the API key for the configured provider.
///
/// Providers that need no key get the Ollama placeholder unless a key
/// variable of their own is configured and set.
pub fn resolve_api_key(settings: &ModelSettings) -> Result<String> {
    let env = match settings.api_key_env() {
        Some(env) => env,
        None => return Ok(OLLAMA_API_KEY.to_string()),
    };

    match std::env::var(&env) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ if !settings.provider.requires_api_key() => Ok(OLLAMA_API_KEY.to_string()),
        Ok(_) => Err(LadleError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            env, env
        ))),
        Err(_) => Err(LadleError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            env, env
        ))),
    }
}

/// Create a chat client for the configured provider.
pub fn create_client(settings: &ModelSettings) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_seconds))
        .build()?;

    let config = OpenAIConfig::new()
        .with_api_base(settings.api_base())
        .with_api_key(resolve_api_key(settings)?);

    Ok(Client::with_config(config).with_http_client(http_client))
}
