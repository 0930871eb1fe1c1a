//! Level generation engine.
//!
//! Difficulty tiers are produced top-down along an explicit ordered plan:
//! the hardest tier is derived from the article, every tier after it from
//! the previous tier's generated text. Each tier's German text triggers one
//! translation call immediately after, so the chain for k tiers is exactly
//! 2k sequential backend calls. Headline and summary metadata come from the
//! hardest tier's response only.

pub mod prompts;

use crate::defaults;
use crate::error::{LernfunkError, Result};
use crate::llm::{ChatBackend, ChatRequest, optional_str, require_str};
use crate::models::{LevelContent, ProcessedStory, RawStory};
use std::collections::BTreeMap;
use tracing::info;

/// What a tier's prompt is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptSource {
    /// The original article text (hardest tier only).
    Article,
    /// The previous tier's generated German text.
    PreviousLevel,
}

/// One tier of the generation plan.
#[derive(Debug, Clone)]
pub struct LevelSpec {
    /// Tier number used in the digest (1 = easiest).
    pub number: u8,
    /// CEFR label, for logging.
    pub cefr: &'static str,
    /// Where this tier's prompt input comes from.
    pub source: PromptSource,
    template: &'static str,
}

impl LevelSpec {
    fn prompt(&self, input: &str) -> String {
        match self.source {
            PromptSource::Article => self.template.replace("{article_text}", input),
            PromptSource::PreviousLevel => self.template.replace("{previous_text}", input),
        }
    }
}

/// Ordered generation plan, hardest tier first.
#[derive(Debug, Clone)]
pub struct LevelPlan {
    specs: Vec<LevelSpec>,
}

impl LevelPlan {
    /// The default three-tier plan: 3 (C1) -> 2 (B1) -> 1 (A1).
    pub fn standard() -> Self {
        Self {
            specs: vec![
                LevelSpec {
                    number: 3,
                    cefr: "C1",
                    source: PromptSource::Article,
                    template: prompts::LEVEL_C1_PROMPT,
                },
                LevelSpec {
                    number: 2,
                    cefr: "B1",
                    source: PromptSource::PreviousLevel,
                    template: prompts::LEVEL_B1_PROMPT,
                },
                LevelSpec {
                    number: 1,
                    cefr: "A1",
                    source: PromptSource::PreviousLevel,
                    template: prompts::LEVEL_A1_PROMPT,
                },
            ],
        }
    }

    /// The five-tier plan: 5 (C1) -> 4 (B2) -> 3 (B1) -> 2 (A2) -> 1 (A1).
    pub fn extended() -> Self {
        Self {
            specs: vec![
                LevelSpec {
                    number: 5,
                    cefr: "C1",
                    source: PromptSource::Article,
                    template: prompts::LEVEL_C1_PROMPT,
                },
                LevelSpec {
                    number: 4,
                    cefr: "B2",
                    source: PromptSource::PreviousLevel,
                    template: prompts::LEVEL_B2_PROMPT,
                },
                LevelSpec {
                    number: 3,
                    cefr: "B1",
                    source: PromptSource::PreviousLevel,
                    template: prompts::LEVEL_B1_PROMPT,
                },
                LevelSpec {
                    number: 2,
                    cefr: "A2",
                    source: PromptSource::PreviousLevel,
                    template: prompts::LEVEL_A2_PROMPT,
                },
                LevelSpec {
                    number: 1,
                    cefr: "A1",
                    source: PromptSource::PreviousLevel,
                    template: prompts::LEVEL_A1_PROMPT,
                },
            ],
        }
    }

    /// Tiers in generation order (hardest first).
    pub fn specs(&self) -> &[LevelSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Generate all difficulty tiers for one story.
///
/// The chain is strictly sequential; any failing call or incomplete
/// response aborts the whole story. The caller decides whether to skip the
/// story or propagate.
pub async fn generate_levels(
    story: &RawStory,
    backend: &dyn ChatBackend,
    plan: &LevelPlan,
) -> Result<ProcessedStory> {
    let mut specs = plan.specs().iter();
    let hardest = specs.next().ok_or_else(|| LernfunkError::Generation {
        message: "level plan is empty".to_string(),
    })?;

    let result = backend
        .complete(&request(hardest.prompt(&story.full_text)))
        .await?;

    // Metadata lives only on the hardest tier; headline falls back to the
    // article's own title when the backend leaves it out.
    let headline_de = optional_str(&result, "headline_de").unwrap_or_else(|| story.title.clone());
    let headline_en = optional_str(&result, "headline_en").unwrap_or_default();
    let summary_en = optional_str(&result, "summary_en").unwrap_or_default();

    let mut previous_text = require_str(&result, "text_de")?;
    let text_en = translate(backend, &previous_text).await?;

    let mut levels: BTreeMap<u8, LevelContent> = BTreeMap::new();
    levels.insert(hardest.number, LevelContent::new(previous_text.clone(), text_en));
    info!(story = %story.id, level = hardest.number, cefr = hardest.cefr, "level generated");

    for spec in specs {
        let result = backend.complete(&request(spec.prompt(&previous_text))).await?;
        let text_de = require_str(&result, "text_de")?;
        let text_en = translate(backend, &text_de).await?;

        levels.insert(spec.number, LevelContent::new(text_de.clone(), text_en));
        info!(story = %story.id, level = spec.number, cefr = spec.cefr, "level generated");
        previous_text = text_de;
    }

    Ok(ProcessedStory {
        id: story.id.clone(),
        headline_de,
        headline_en,
        summary_en,
        source_url: story.link.clone(),
        levels,
    })
}

async fn translate(backend: &dyn ChatBackend, text_de: &str) -> Result<String> {
    let prompt = prompts::TRANSLATION_PROMPT.replace("{text_de}", text_de);
    let result = backend.complete(&request(prompt)).await?;
    require_str(&result, "text_en")
}

fn request(user: String) -> ChatRequest {
    ChatRequest {
        system: prompts::SYSTEM_PROMPT.to_string(),
        user,
        temperature: defaults::LLM_TEMPERATURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockChatBackend;
    use chrono::Utc;
    use serde_json::json;

    fn raw_story() -> RawStory {
        RawStory {
            id: "a-123".to_string(),
            title: "Originaltitel".to_string(),
            link: "https://example.com/article".to_string(),
            full_text: "Der Bundestag hat heute ein neues Gesetz verabschiedet.".to_string(),
            published_date: Utc::now(),
        }
    }

    fn scripted_standard_run() -> MockChatBackend {
        MockChatBackend::new()
            .with_response(json!({
                "text_de": "C1 Text.",
                "headline_de": "Schlagzeile",
                "headline_en": "Headline",
                "summary_en": "A summary."
            }))
            .with_response(json!({"text_en": "C1 translation."}))
            .with_response(json!({"text_de": "B1 Text."}))
            .with_response(json!({"text_en": "B1 translation."}))
            .with_response(json!({"text_de": "A1 Text."}))
            .with_response(json!({"text_en": "A1 translation."}))
    }

    #[test]
    fn test_standard_plan_shape() {
        let plan = LevelPlan::standard();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.specs()[0].number, 3);
        assert_eq!(plan.specs()[0].source, PromptSource::Article);
        assert!(
            plan.specs()[1..]
                .iter()
                .all(|s| s.source == PromptSource::PreviousLevel)
        );
    }

    #[test]
    fn test_extended_plan_shape() {
        let plan = LevelPlan::extended();
        assert_eq!(plan.len(), 5);
        assert_eq!(plan.specs()[0].number, 5);
        let numbers: Vec<u8> = plan.specs().iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![5, 4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_generates_all_levels_with_metadata_from_hardest() {
        let backend = scripted_standard_run();
        let story = generate_levels(&raw_story(), &backend, &LevelPlan::standard())
            .await
            .unwrap();

        assert_eq!(story.id, "a-123");
        assert_eq!(story.headline_de, "Schlagzeile");
        assert_eq!(story.headline_en, "Headline");
        assert_eq!(story.summary_en, "A summary.");
        assert_eq!(story.source_url, "https://example.com/article");

        assert_eq!(story.levels.len(), 3);
        assert_eq!(story.levels[&3].text_de, "C1 Text.");
        assert_eq!(story.levels[&3].text_en, "C1 translation.");
        assert_eq!(story.levels[&2].text_de, "B1 Text.");
        assert_eq!(story.levels[&1].text_de, "A1 Text.");
    }

    #[tokio::test]
    async fn test_chain_is_sequential_and_feeds_previous_text() {
        let backend = scripted_standard_run();
        generate_levels(&raw_story(), &backend, &LevelPlan::standard())
            .await
            .unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 6, "three tiers need exactly six calls");

        // Hardest tier sees the article, not any generated text
        assert!(requests[0].user.contains("Der Bundestag"));
        // Its translation sees the C1 text
        assert!(requests[1].user.contains("C1 Text."));
        // B1 simplifies the C1 output, not the article
        assert!(requests[2].user.contains("C1 Text."));
        assert!(!requests[2].user.contains("Der Bundestag"));
        assert!(requests[3].user.contains("B1 Text."));
        // A1 simplifies the B1 output
        assert!(requests[4].user.contains("B1 Text."));
        assert!(!requests[4].user.contains("C1 Text."));
        assert!(requests[5].user.contains("A1 Text."));
    }

    #[tokio::test]
    async fn test_headline_falls_back_to_article_title() {
        let backend = MockChatBackend::new()
            .with_response(json!({"text_de": "C1 Text."}))
            .with_response(json!({"text_en": "C1 translation."}))
            .with_response(json!({"text_de": "B1 Text."}))
            .with_response(json!({"text_en": "B1 translation."}))
            .with_response(json!({"text_de": "A1 Text."}))
            .with_response(json!({"text_en": "A1 translation."}));

        let story = generate_levels(&raw_story(), &backend, &LevelPlan::standard())
            .await
            .unwrap();
        assert_eq!(story.headline_de, "Originaltitel");
        assert_eq!(story.headline_en, "");
        assert_eq!(story.summary_en, "");
    }

    #[tokio::test]
    async fn test_missing_text_de_aborts_story() {
        let backend = MockChatBackend::new().with_response(json!({"headline_de": "x"}));
        let result = generate_levels(&raw_story(), &backend, &LevelPlan::standard()).await;
        match result {
            Err(LernfunkError::MissingField { field }) => assert_eq!(field, "text_de"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_translation_aborts_story() {
        let backend = MockChatBackend::new()
            .with_response(json!({"text_de": "C1 Text."}))
            .with_response(json!({"wrong": "field"}));
        let result = generate_levels(&raw_story(), &backend, &LevelPlan::standard()).await;
        assert!(matches!(result, Err(LernfunkError::MissingField { .. })));
    }

    #[tokio::test]
    async fn test_mid_chain_failure_aborts_story() {
        // Only the first tier is scripted; the B1 call hits an empty queue
        let backend = MockChatBackend::new()
            .with_response(json!({"text_de": "C1 Text."}))
            .with_response(json!({"text_en": "C1 translation."}));
        let result = generate_levels(&raw_story(), &backend, &LevelPlan::standard()).await;
        assert!(matches!(result, Err(LernfunkError::Generation { .. })));
        assert_eq!(backend.requests().len(), 3);
    }
}
