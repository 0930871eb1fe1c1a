//! lernfunk - Graded German news audio for language learners
//!
//! Fetches news articles, rewrites each into CEFR-graded difficulty tiers
//! with English translations, narrates every tier to normalized audio, and
//! writes a JSON digest for the front end.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod digest;
pub mod error;
pub mod levels;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod sources;

// Core traits (generate → narrate → assemble)
pub use audio::processor::AudioProcessor;
pub use audio::synth::SpeechBackend;
pub use llm::ChatBackend;

// Rendering pipeline
pub use audio::renderer::{AudioRenderer, RenderedAudio};
pub use audio::story::render_story_audio;

// Level generation
pub use levels::{LevelPlan, generate_levels};

// Error handling
pub use error::{LernfunkError, Result};

// Config
pub use config::Config;

// Data model
pub use models::{LevelContent, ProcessedStory, RawStory};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
