//! Renders one text into one normalized audio artifact.
//!
//! Steps: chunk the text, synthesize each chunk into a scratch segment,
//! concatenate segments (only when there is more than one) into a raw track,
//! re-encode the raw track to the fixed output profile, then read the final
//! duration from the artifact itself. Scratch files live in `NamedTempFile`s
//! so they are removed on every exit path, success or failure. The final
//! encode is staged next to the destination and persisted atomically, so a
//! failed render never leaves a partial destination file.

use crate::audio::chunker::chunk_text;
use crate::audio::processor::AudioProcessor;
use crate::audio::synth::SpeechBackend;
use crate::defaults;
use crate::error::{LernfunkError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::info;

/// A finished audio artifact and its measured duration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedAudio {
    pub path: PathBuf,
    /// Duration read from the re-encoded file's own metadata.
    pub duration_seconds: f64,
}

/// Renders texts into normalized audio files.
pub struct AudioRenderer {
    speech: Arc<dyn SpeechBackend>,
    processor: Arc<dyn AudioProcessor>,
    max_chunk_chars: usize,
}

impl AudioRenderer {
    pub fn new(speech: Arc<dyn SpeechBackend>, processor: Arc<dyn AudioProcessor>) -> Self {
        Self {
            speech,
            processor,
            max_chunk_chars: defaults::TTS_MAX_CHARS,
        }
    }

    /// Override the synthesis character budget (mainly for tests).
    pub fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars;
        self
    }

    /// Render `text` with `voice` into `destination`.
    ///
    /// # Errors
    ///
    /// Any failing step aborts the whole render; scratch files are cleaned
    /// up and nothing is written to `destination`.
    pub async fn render(&self, voice: &str, text: &str, destination: &Path) -> Result<RenderedAudio> {
        let parent = destination.parent().ok_or_else(|| {
            LernfunkError::Other(format!(
                "destination {} has no parent directory",
                destination.display()
            ))
        })?;
        tokio::fs::create_dir_all(parent).await?;

        let chunks = chunk_text(text, self.max_chunk_chars);

        // Synthesize every chunk before assembly; segments share no state
        // but the later-adopted sequential dispatch keeps backend load flat.
        let mut segments: Vec<NamedTempFile> = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let segment = scratch_file("lernfunk-seg-")?;
            self.speech.synthesize(voice, chunk, segment.path()).await?;
            segments.push(segment);
        }

        // Single chunk: the segment already is the raw track.
        let raw_track = if segments.len() > 1 {
            let raw = scratch_file("lernfunk-raw-")?;
            let inputs: Vec<PathBuf> = segments.iter().map(|s| s.path().to_path_buf()).collect();
            self.processor.concat(&inputs, raw.path()).await?;
            Some(raw)
        } else {
            None
        };
        let raw_path = raw_track
            .as_ref()
            .map(|r| r.path())
            .unwrap_or_else(|| segments[0].path());

        // Stage the encode in the destination directory so persist is a rename.
        let staged = tempfile::Builder::new()
            .prefix(".level-")
            .suffix(&format!(".{}", defaults::AUDIO_EXT))
            .tempfile_in(parent)?;
        self.processor.reencode(raw_path, staged.path()).await?;
        staged
            .persist(destination)
            .map_err(|e| LernfunkError::Io(e.error))?;

        let duration_seconds = self.processor.duration_secs(destination).await?;

        info!(
            artifact = %destination.display(),
            duration_seconds,
            chunks = chunks.len(),
            "generated audio"
        );

        Ok(RenderedAudio {
            path: destination.to_path_buf(),
            duration_seconds,
        })
    }
}

fn scratch_file(prefix: &str) -> Result<NamedTempFile> {
    Ok(tempfile::Builder::new()
        .prefix(prefix)
        .suffix(&format!(".{}", defaults::AUDIO_EXT))
        .tempfile()?)
}
