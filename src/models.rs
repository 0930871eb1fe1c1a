//! Core data types flowing through the pipeline.
//!
//! A [`RawStory`] comes out of feed discovery, the level generation engine
//! turns it into a [`ProcessedStory`], and audio rendering replaces the
//! story with a new instance whose [`LevelContent`] entries carry audio
//! metadata. All three are value types; stages never mutate shared state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fetched article before any processing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStory {
    /// Stable identifier from the news source.
    pub id: String,
    /// Original article headline.
    pub title: String,
    /// Canonical article URL with tracking parameters stripped.
    pub link: String,
    /// Full source-language body text.
    pub full_text: String,
    /// Publication timestamp from the feed.
    pub published_date: DateTime<Utc>,
}

/// One difficulty tier's rendered content.
///
/// Audio fields stay unset until synthesis succeeds for this tier; a failed
/// render leaves the text untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelContent {
    /// Generated German text at this tier's difficulty.
    pub text_de: String,
    /// English translation of `text_de`.
    pub text_en: String,
    /// Audio path relative to the content root, once rendered.
    pub audio_url: Option<String>,
    /// Duration of the rendered audio, rounded to one decimal.
    pub audio_duration_seconds: Option<f64>,
}

impl LevelContent {
    /// Create tier content with audio fields unset.
    pub fn new(text_de: impl Into<String>, text_en: impl Into<String>) -> Self {
        Self {
            text_de: text_de.into(),
            text_en: text_en.into(),
            audio_url: None,
            audio_duration_seconds: None,
        }
    }

    /// Return a copy of this content with audio metadata attached.
    pub fn with_audio(self, audio_url: impl Into<String>, duration_seconds: f64) -> Self {
        Self {
            audio_url: Some(audio_url.into()),
            audio_duration_seconds: Some(duration_seconds),
            ..self
        }
    }
}

/// A story after level generation, optionally carrying per-tier audio.
///
/// Headline and summary metadata come from the hardest tier's generation
/// result only. The `levels` map is keyed by tier number (1 = easiest);
/// `BTreeMap` keeps tiers in ascending order everywhere they are iterated
/// or serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedStory {
    pub id: String,
    pub headline_de: String,
    pub headline_en: String,
    pub summary_en: String,
    pub source_url: String,
    pub levels: BTreeMap<u8, LevelContent>,
}
