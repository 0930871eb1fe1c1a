//! Per-story audio fan-out.
//!
//! Every tier of a story renders concurrently; one tier failing never
//! cancels or blocks its siblings. Failed tiers keep their text and stay
//! without audio metadata.

use crate::audio::renderer::AudioRenderer;
use crate::defaults;
use crate::models::ProcessedStory;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::warn;

/// Render audio for all tiers of `story` under `content_dir`.
///
/// Artifacts land at `<content_dir>/<story_id>/level-<tier>.mp3`; the stored
/// `audio_url` is relative to `content_dir`'s parent so the digest stays
/// portable across deployment roots. Returns a new story whose level map
/// reflects the per-tier outcomes; the tier set is unchanged.
pub async fn render_story_audio(
    story: ProcessedStory,
    renderer: Arc<AudioRenderer>,
    voice: &str,
    content_dir: &Path,
) -> ProcessedStory {
    let mut tasks = JoinSet::new();
    for (&level, content) in &story.levels {
        let renderer = Arc::clone(&renderer);
        let voice = voice.to_string();
        let text = content.text_de.clone();
        let destination = content_dir
            .join(&story.id)
            .join(format!("level-{level}.{}", defaults::AUDIO_EXT));
        tasks.spawn(async move {
            let outcome = renderer.render(&voice, &text, &destination).await;
            (level, outcome)
        });
    }

    let base = content_dir.parent().unwrap_or_else(|| Path::new(""));
    let mut levels = story.levels.clone();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((level, Ok(rendered))) => {
                let relative = rendered.path.strip_prefix(base).unwrap_or(&rendered.path);
                let audio_url = relative.to_string_lossy().into_owned();
                let duration = round_tenths(rendered.duration_seconds);
                if let Some(content) = levels.get_mut(&level) {
                    *content = content.clone().with_audio(audio_url, duration);
                }
            }
            Ok((level, Err(e))) => {
                warn!(story = %story.id, level, error = %e, "audio generation failed, keeping text only");
            }
            Err(e) => {
                warn!(story = %story.id, error = %e, "audio render task aborted");
            }
        }
    }

    ProcessedStory { levels, ..story }
}

/// Round a duration to one decimal for the digest.
fn round_tenths(seconds: f64) -> f64 {
    (seconds * 10.0).round() / 10.0
}
