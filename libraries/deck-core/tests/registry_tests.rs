//! Integration tests for manifest loading
//!
//! These tests load real manifest files from disk and check that the
//! registry and asset addressing agree on what each slide plays.

use deck_core::{AssetTemplate, DeckError, SlideId, SlideRegistry};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

// ===== Test Helpers =====

fn write_manifest(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp manifest");
    file.write_all(json.as_bytes()).expect("write manifest");
    file.flush().expect("flush manifest");
    file
}

const PRESENTATION_JSON: &str = r#"{
  "title": "Does sleep affect code quality?",
  "slides": [
    { "id": "1", "duration": 20, "speakerNotes": "Welcome everyone", "narration": "Hello." },
    { "id": "2", "duration": 35, "speakerNotes": "Study design" },
    { "id": "3", "durationSeconds": 30 },
    { "id": "4", "narrationScript": "Thanks for listening." }
  ]
}"#;

// ===== Loading =====

#[test]
fn test_load_presentation_manifest_from_disk() {
    let file = write_manifest(PRESENTATION_JSON);
    let registry = SlideRegistry::load(file.path(), Duration::from_secs(12)).unwrap();

    assert_eq!(registry.len(), 4);
    assert_eq!(registry.title(), Some("Does sleep affect code quality?"));

    let first = registry.get(0).unwrap();
    assert_eq!(first.duration_seconds, 20.0);
    assert_eq!(first.notes.as_deref(), Some("Welcome everyone"));
    assert_eq!(first.narration_script.as_deref(), Some("Hello."));

    // Missing duration takes the supplied default
    let last = registry.get(3).unwrap();
    assert_eq!(last.duration(), Duration::from_secs(12));
    assert_eq!(last.narration_script.as_deref(), Some("Thanks for listening."));
}

#[test]
fn test_order_is_navigation_order() {
    let file = write_manifest(r#"[{"id":"c"},{"id":"a"},{"id":"b"}]"#);
    let registry = SlideRegistry::load(file.path(), Duration::from_secs(1)).unwrap();

    let ids: Vec<&str> = registry.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SlideRegistry::load(dir.path().join("nope.json"), Duration::ZERO).unwrap_err();
    assert!(matches!(err, DeckError::Io(_)));
}

#[test]
fn test_negative_duration_in_file() {
    let file = write_manifest(r#"[{"id":"a","duration":5},{"id":"b","duration":-2}]"#);
    let err = SlideRegistry::load(file.path(), Duration::ZERO).unwrap_err();

    match err {
        DeckError::InvalidDuration { id, value } => {
            assert_eq!(id, SlideId::new("b"));
            assert_eq!(value, -2.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ===== Asset addressing =====

#[test]
fn test_every_slide_has_a_distinct_asset() {
    let file = write_manifest(PRESENTATION_JSON);
    let registry = SlideRegistry::load(file.path(), Duration::from_secs(10)).unwrap();
    let template = AssetTemplate::default();

    let assets: Vec<String> = registry
        .iter()
        .map(|slide| template.resolve(&slide.id).to_string())
        .collect();

    assert_eq!(
        assets,
        vec![
            "/audio/slide-1.mp3",
            "/audio/slide-2.mp3",
            "/audio/slide-3.mp3",
            "/audio/slide-4.mp3",
        ]
    );
}
