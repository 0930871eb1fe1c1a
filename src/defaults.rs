//! Default configuration constants for lernfunk.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Maximum characters per synthesis request.
///
/// The speech backend rejects inputs above 4096 characters, so longer texts
/// are split into sentence-aligned chunks below this budget.
pub const TTS_MAX_CHARS: usize = 4096;

/// Audio channel count for the normalized output profile (mono).
pub const AUDIO_CHANNELS: &str = "1";

/// Audio bitrate for the normalized output profile.
///
/// 48 kbps keeps file sizes predictable for a daily digest of several
/// stories with up to five narrations each.
pub const AUDIO_BITRATE: &str = "48k";

/// Audio sample rate for the normalized output profile in Hz.
pub const AUDIO_SAMPLE_RATE: &str = "22050";

/// File extension for rendered audio artifacts.
pub const AUDIO_EXT: &str = "mp3";

/// Default chat model for level generation and translation.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Default speech synthesis model.
pub const DEFAULT_TTS_MODEL: &str = "tts-1";

/// Default narration voice.
pub const DEFAULT_TTS_VOICE: &str = "nova";

/// Default API base URL for both the chat and speech backends.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// RSS feed used for story discovery.
pub const DEFAULT_FEED_URL: &str = "https://rss.dw.com/xml/rss-de-all";

/// Article detail API; `{id}` is replaced with the feed entry's id.
pub const DEFAULT_ARTICLE_API_URL: &str = "https://api.dw.com/api/detail/article/{id}";

/// Default number of stories per digest.
pub const DEFAULT_MAX_STORIES: usize = 5;

/// Default output directory for digests and audio.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Timeout for feed and article fetches in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Timeout for a single generation or translation call in seconds.
///
/// Simplifying a full-length article can take well over a minute on slow
/// backends; beyond this the chain aborts rather than hanging the story.
pub const GENERATION_TIMEOUT_SECS: u64 = 180;

/// Timeout for a single synthesis call in seconds.
pub const SYNTHESIS_TIMEOUT_SECS: u64 = 120;

/// Timeout for one ffmpeg/ffprobe invocation in seconds.
pub const AUDIO_TOOL_TIMEOUT_SECS: u64 = 60;

/// Sampling temperature for generation and translation calls.
///
/// Low but non-zero: simplification should be deterministic in structure
/// while keeping natural phrasing.
pub const LLM_TEMPERATURE: f32 = 0.3;

/// Schema version stamped into every digest.
pub const DIGEST_SCHEMA_VERSION: u32 = 1;
