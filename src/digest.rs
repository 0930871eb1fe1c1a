//! Digest assembly and writing.
//!
//! The digest is the daily output bundle the front end consumes: one JSON
//! document per day under `content/<date>/digest.json`, mirrored as
//! `latest.json` at the content root so clients can always fetch today's
//! issue without knowing the date.

use crate::defaults;
use crate::error::Result;
use crate::models::ProcessedStory;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The serialized daily bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    pub schema_version: u32,
    pub date: String,
    pub generated_at: String,
    pub stories: Vec<ProcessedStory>,
}

/// Assemble the digest for one day's stories.
pub fn build_digest(stories: Vec<ProcessedStory>, date: &str) -> Digest {
    Digest {
        schema_version: defaults::DIGEST_SCHEMA_VERSION,
        date: date.to_string(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        stories,
    }
}

/// Write `digest.json` under `content_dir` and a `latest.json` copy at the
/// content root. Returns the digest path.
pub fn write_digest(digest: &Digest, content_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(content_dir)?;
    let json = serde_json::to_string_pretty(digest)?;

    let digest_path = content_dir.join("digest.json");
    fs::write(&digest_path, &json)?;
    info!(path = %digest_path.display(), "wrote digest");

    if let Some(content_root) = content_dir.parent() {
        let latest_path = content_root.join("latest.json");
        fs::write(&latest_path, &json)?;
        info!(path = %latest_path.display(), "wrote latest");
    }

    Ok(digest_path)
}
