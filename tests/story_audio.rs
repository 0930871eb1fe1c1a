//! End-to-end tests for audio rendering and the per-story fan-out, using
//! mock synthesis and audio-processing backends (no network, no ffmpeg).

use lernfunk::audio::{
    AudioRenderer, MockProcessor, MockSpeech, ProcessorCall, render_story_audio,
};
use lernfunk::digest::build_digest;
use lernfunk::models::{LevelContent, ProcessedStory};
use std::collections::BTreeMap;
use std::sync::Arc;

fn story(levels: &[(u8, &str)]) -> ProcessedStory {
    let mut map = BTreeMap::new();
    for (number, text) in levels {
        map.insert(*number, LevelContent::new(*text, "english"));
    }
    ProcessedStory {
        id: "a-42".to_string(),
        headline_de: "Schlagzeile".to_string(),
        headline_en: "Headline".to_string(),
        summary_en: "Summary".to_string(),
        source_url: "https://example.com/a-42".to_string(),
        levels: map,
    }
}

#[tokio::test]
async fn partial_failure_keeps_sibling_tiers_and_never_panics() {
    let root = tempfile::tempdir().unwrap();
    let content_dir = root.path().join("content").join("2026-08-05");

    let speech = Arc::new(MockSpeech::new().with_failure_when("Schwer"));
    let processor = Arc::new(MockProcessor::new().with_duration(21.07));
    let renderer = Arc::new(AudioRenderer::new(
        Arc::clone(&speech) as Arc<dyn lernfunk::SpeechBackend>,
        Arc::clone(&processor) as Arc<dyn lernfunk::AudioProcessor>,
    ));

    let input = story(&[(1, "Einfacher Satz."), (2, "Schwerer Satz.")]);
    let updated = render_story_audio(input, renderer, "nova", &content_dir).await;

    assert_eq!(updated.levels.len(), 2);

    let ok = &updated.levels[&1];
    assert_eq!(
        ok.audio_url.as_deref(),
        Some("2026-08-05/a-42/level-1.mp3"),
        "audio path must be relative to the content root"
    );
    assert_eq!(ok.audio_duration_seconds, Some(21.1));
    assert!(content_dir.join("a-42").join("level-1.mp3").exists());

    let failed = &updated.levels[&2];
    assert_eq!(failed.text_de, "Schwerer Satz.");
    assert!(failed.audio_url.is_none());
    assert!(failed.audio_duration_seconds.is_none());
    assert!(!content_dir.join("a-42").join("level-2.mp3").exists());
}

#[tokio::test]
async fn long_text_is_chunked_concatenated_and_reencoded_once() {
    let root = tempfile::tempdir().unwrap();
    let content_dir = root.path().join("content").join("2026-08-05");

    let speech = Arc::new(MockSpeech::new());
    let processor = Arc::new(MockProcessor::new().with_duration(90.0));
    let renderer = Arc::new(
        AudioRenderer::new(
            Arc::clone(&speech) as Arc<dyn lernfunk::SpeechBackend>,
            Arc::clone(&processor) as Arc<dyn lernfunk::AudioProcessor>,
        )
        .with_max_chunk_chars(40),
    );

    let text = "Erster Satz des Berichts. Zweiter Satz des Berichts. Dritter Satz des Berichts.";
    let input = story(&[(3, text)]);
    let updated = render_story_audio(input, renderer, "nova", &content_dir).await;

    assert!(updated.levels[&3].audio_url.is_some());

    // All chunks synthesized, in original order
    let requests = speech.requests();
    assert!(requests.len() > 1, "long text must be split into chunks");
    let rejoined = requests
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rejoined, text);

    // Exactly one concat and one re-encode
    let calls = processor.calls();
    let concats = calls
        .iter()
        .filter(|c| matches!(c, ProcessorCall::Concat { .. }))
        .count();
    let reencodes = calls
        .iter()
        .filter(|c| matches!(c, ProcessorCall::Reencode { .. }))
        .count();
    assert_eq!(concats, 1);
    assert_eq!(reencodes, 1);
}

#[tokio::test]
async fn rendered_story_serializes_into_a_consumable_digest() {
    let root = tempfile::tempdir().unwrap();
    let content_dir = root.path().join("content").join("2026-08-05");

    let renderer = Arc::new(AudioRenderer::new(
        Arc::new(MockSpeech::new()),
        Arc::new(MockProcessor::new().with_duration(12.3)),
    ));

    let input = story(&[(1, "Einfach."), (2, "Mittel."), (3, "Schwer.")]);
    let updated = render_story_audio(input, renderer, "nova", &content_dir).await;

    let digest = build_digest(vec![updated], "2026-08-05");
    let json = serde_json::to_value(&digest).unwrap();

    let levels = &json["stories"][0]["levels"];
    for tier in ["1", "2", "3"] {
        assert_eq!(
            levels[tier]["audio_url"],
            format!("2026-08-05/a-42/level-{tier}.mp3")
        );
        assert_eq!(levels[tier]["audio_duration_seconds"], 12.3);
    }
}
