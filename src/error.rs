//! Error types for Ladle.

use thiserror::Error;

/// Library-level error type for Ladle operations.
#[derive(Error, Debug)]
pub enum LadleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Supplier data error: {0}")]
    Suppliers(String),

    #[error("Memory store error: {0}")]
    Memory(String),

    #[error("Web search failed: {0}")]
    Search(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model API error: {0}")]
    Model(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for Ladle operations.
pub type Result<T> = std::result::Result<T, LadleError>;
