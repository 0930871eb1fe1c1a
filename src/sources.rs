//! Story discovery and retrieval.
//!
//! Discovery reads the news source's RSS feed; full article bodies come from
//! its JSON detail API. A single unreachable article is skipped; an empty
//! feed is an error, since the pipeline treats "zero stories" as fatal.

use crate::error::{LernfunkError, Result};
use crate::models::RawStory;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

/// Settings for one discovery run.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub feed_url: String,
    /// Detail API template; `{id}` is replaced with the entry id.
    pub article_api_url: String,
    pub max_stories: usize,
    pub timeout_secs: u64,
}

/// One parsed feed entry before its body text is fetched.
#[derive(Debug, Clone, PartialEq)]
struct FeedEntry {
    id: String,
    title: String,
    link: String,
    published: DateTime<Utc>,
}

/// Fetch up to `max_stories` stories with full body text.
///
/// Scans twice as many feed entries as requested so skipped articles don't
/// shrink the digest.
pub async fn fetch_stories(config: &SourceConfig) -> Result<Vec<RawStory>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let body = client
        .get(&config.feed_url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let channel = rss::Channel::read_from(&body[..]).map_err(|e| LernfunkError::Feed {
        message: e.to_string(),
    })?;
    if channel.items().is_empty() {
        return Err(LernfunkError::Feed {
            message: format!("feed {} contains no entries", config.feed_url),
        });
    }
    info!(entries = channel.items().len(), "fetched feed");

    let mut stories = Vec::new();
    for item in channel.items().iter().take(config.max_stories * 2) {
        if stories.len() >= config.max_stories {
            break;
        }
        let Some(entry) = parse_item(item) else {
            warn!("skipping feed entry without id");
            continue;
        };
        match fetch_article_text(&client, &config.article_api_url, &entry.id).await {
            Ok(full_text) => stories.push(RawStory {
                id: entry.id,
                title: entry.title,
                link: entry.link,
                full_text,
                published_date: entry.published,
            }),
            Err(e) => {
                warn!(id = %entry.id, error = %e, "failed to fetch article, skipping");
            }
        }
    }

    info!(count = stories.len(), "fetched stories with full text");
    Ok(stories)
}

fn parse_item(item: &rss::Item) -> Option<FeedEntry> {
    let id = item
        .guid()
        .map(|g| g.value().to_string())
        .or_else(|| item.link().map(str::to_string))?;
    let title = item.title().unwrap_or_default().to_string();
    let link = strip_tracking(item.link().unwrap_or_default());
    let published = item
        .pub_date()
        .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Some(FeedEntry {
        id,
        title,
        link,
        published,
    })
}

/// Drop tracking parameters from an article link.
fn strip_tracking(link: &str) -> String {
    link.split('?').next().unwrap_or(link).to_string()
}

async fn fetch_article_text(
    client: &reqwest::Client,
    template: &str,
    id: &str,
) -> Result<String> {
    let url = template.replace("{id}", id);
    let detail: Value = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let text = detail.get("text").and_then(Value::as_str).unwrap_or_default();
    if text.is_empty() {
        return Err(LernfunkError::ArticleEmpty { id: id.to_string() });
    }
    Ok(text.to_string())
}
