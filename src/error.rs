//! Error types for lernfunk.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LernfunkError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("OPENAI_API_KEY environment variable is required")]
    ApiKeyMissing,

    // Feed and article errors
    #[error("Feed error: {message}")]
    Feed { message: String },

    #[error("No text found for article {id}")]
    ArticleEmpty { id: String },

    // Text generation errors
    #[error("Generation failed: {message}")]
    Generation { message: String },

    #[error("Response missing field '{field}'")]
    MissingField { field: String },

    // Speech synthesis errors
    #[error("Speech synthesis failed: {message}")]
    Synthesis { message: String },

    // External audio tool errors
    #[error("{program} failed: {message}")]
    AudioTool { program: String, message: String },

    #[error("{program} timed out after {seconds}s")]
    AudioToolTimeout { program: String, seconds: u64 },

    // Transport and I/O errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, LernfunkError>;
