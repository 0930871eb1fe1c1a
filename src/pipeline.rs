//! Pipeline driver: fetch → generate levels → render audio → write digest.
//!
//! Stories are processed one at a time; a story whose generation chain fails
//! is skipped, audio failures are absorbed per tier inside the orchestrator,
//! and the run only aborts when nothing at all could be processed.

use crate::audio::{AudioRenderer, FfmpegProcessor, OpenAiSpeech, render_story_audio};
use crate::config::Config;
use crate::digest;
use crate::error::{LernfunkError, Result};
use crate::levels::{LevelPlan, generate_levels};
use crate::llm::OpenAiChat;
use crate::models::ProcessedStory;
use crate::sources::{self, SourceConfig};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

/// Run the full content pipeline for today's issue.
pub async fn run(config: &Config, api_key: &str, plan: &LevelPlan) -> Result<()> {
    let today = Utc::now().date_naive().to_string();
    let content_dir = config.output.dir.join("content").join(&today);

    // Step 1: discover stories
    info!("fetching stories");
    let source_config = SourceConfig {
        feed_url: config.fetch.feed_url.clone(),
        article_api_url: config.fetch.article_api_url.clone(),
        max_stories: config.fetch.max_stories,
        timeout_secs: config.fetch.timeout_secs,
    };
    let raw_stories = sources::fetch_stories(&source_config).await?;
    if raw_stories.is_empty() {
        return Err(LernfunkError::Other(
            "no stories fetched, aborting".to_string(),
        ));
    }
    info!(count = raw_stories.len(), "stories fetched");

    // Step 2: generate difficulty levels, one sequential chain per story
    let chat = OpenAiChat::new(api_key, &config.llm.model)?.with_base_url(&config.llm.base_url);
    let mut processed: Vec<ProcessedStory> = Vec::new();
    for raw in &raw_stories {
        info!(id = %raw.id, title = %raw.title, "generating levels");
        match generate_levels(raw, &chat, plan).await {
            Ok(story) => processed.push(story),
            Err(e) => error!(id = %raw.id, error = %e, "level generation failed, skipping story"),
        }
    }
    if processed.is_empty() {
        return Err(LernfunkError::Other(
            "no stories processed successfully, aborting".to_string(),
        ));
    }

    // Step 3: render audio; per-tier failures are absorbed by the orchestrator
    let speech =
        OpenAiSpeech::new(api_key, &config.tts.model)?.with_base_url(&config.tts.base_url);
    let renderer = Arc::new(AudioRenderer::new(
        Arc::new(speech),
        Arc::new(FfmpegProcessor::new()),
    ));
    let mut with_audio = Vec::with_capacity(processed.len());
    for story in processed {
        info!(id = %story.id, "generating audio");
        let updated =
            render_story_audio(story, Arc::clone(&renderer), &config.tts.voice, &content_dir).await;
        with_audio.push(updated);
    }

    // Step 4: write the digest
    let bundle = digest::build_digest(with_audio, &today);
    digest::write_digest(&bundle, &content_dir)?;

    let audio_files = bundle
        .stories
        .iter()
        .flat_map(|s| s.levels.values())
        .filter(|c| c.audio_url.is_some())
        .count();
    info!(
        stories = bundle.stories.len(),
        audio_files, "pipeline complete"
    );

    Ok(())
}
