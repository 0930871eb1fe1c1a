//! Configuration loading.
//!
//! Settings come from an optional TOML file with `LERNFUNK_*` environment
//! overrides on top. The API key is never read from the file, only from
//! `OPENAI_API_KEY`.

use crate::defaults;
use crate::error::{LernfunkError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub tts: TtsConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// Text-generation backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
}

/// Speech-synthesis backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TtsConfig {
    pub model: String,
    pub voice: String,
    pub base_url: String,
}

/// Story discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    pub feed_url: String,
    pub article_api_url: String,
    pub max_stories: usize,
    pub timeout_secs: u64,
}

/// Output location configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_LLM_MODEL.to_string(),
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_TTS_MODEL.to_string(),
            voice: defaults::DEFAULT_TTS_VOICE.to_string(),
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            feed_url: defaults::DEFAULT_FEED_URL.to_string(),
            article_api_url: defaults::DEFAULT_ARTICLE_API_URL.to_string(),
            max_stories: defaults::DEFAULT_MAX_STORIES,
            timeout_secs: defaults::FETCH_TIMEOUT_SECS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(defaults::DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LernfunkError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                LernfunkError::Io(e)
            }
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load configuration from a file or return defaults if the file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(LernfunkError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - LERNFUNK_MODEL → llm.model
    /// - LERNFUNK_VOICE → tts.voice
    /// - LERNFUNK_MAX_STORIES → fetch.max_stories
    /// - LERNFUNK_OUTPUT_DIR → output.dir
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(model) = std::env::var("LERNFUNK_MODEL")
            && !model.is_empty()
        {
            self.llm.model = model;
        }
        if let Ok(voice) = std::env::var("LERNFUNK_VOICE")
            && !voice.is_empty()
        {
            self.tts.voice = voice;
        }
        if let Ok(max_stories) = std::env::var("LERNFUNK_MAX_STORIES")
            && !max_stories.is_empty()
        {
            self.fetch.max_stories =
                max_stories
                    .parse()
                    .map_err(|_| LernfunkError::ConfigInvalidValue {
                        key: "LERNFUNK_MAX_STORIES".to_string(),
                        message: format!("'{max_stories}' is not a number"),
                    })?;
        }
        if let Ok(dir) = std::env::var("LERNFUNK_OUTPUT_DIR")
            && !dir.is_empty()
        {
            self.output.dir = PathBuf::from(dir);
        }
        Ok(self)
    }
}

/// Read the backend API key from the environment.
pub fn api_key_from_env() -> Result<String> {
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or(LernfunkError::ApiKeyMissing)
}
