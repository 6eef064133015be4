use test_recorder::ai::client::AiSettings;
use test_recorder::ai::request::RequestContext;
use test_recorder::candidate::candidate_model::{MatchMode, SelectorType};
use test_recorder::evaluate::evaluator::{
    FileEvaluator, MockEvaluator, SelectorEvaluator, probes_for,
};
use test_recorder::event::event_model::{ActionKind, RecordedEvent};
use test_recorder::trace::logger::TraceLogger;
use test_recorder::{review_code, suggest_selectors};

use crate::common::builders::{counted_evaluation, typed_candidate};

mod common;

// ============================================================================
// Evaluator seam
// ============================================================================

#[test]
fn probes_carry_type_and_match_mode() {
    let mut text_candidate = typed_candidate("text=\"Go\"", SelectorType::Text);
    text_candidate.match_mode = Some(MatchMode::Contains);

    let probes = probes_for(&[text_candidate]);

    assert_eq!(probes.len(), 1);
    assert_eq!(probes[0].selector, "text=\"Go\"");
    assert_eq!(probes[0].selector_type, Some(SelectorType::Text));
    assert_eq!(probes[0].match_mode, Some(MatchMode::Contains));
}

#[test]
fn mock_evaluator_returns_canned_results() {
    let mut evaluator = MockEvaluator::with_results(vec![counted_evaluation("#a", 1)]);
    let response = evaluator.evaluate(&[]);

    assert!(response.ok);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].match_count, Some(1));
}

#[test]
fn file_evaluator_accepts_bare_result_arrays() {
    let path = std::env::temp_dir().join("recorder_eval_bare.json");
    std::fs::write(&path, r##"[{"selector": "#a", "match_count": 1}]"##).expect("temp write");

    let mut evaluator = FileEvaluator::new(path.to_string_lossy().to_string());
    let response = evaluator.evaluate(&[]);

    assert!(response.ok);
    assert_eq!(response.results.len(), 1);

    std::fs::remove_file(&path).ok();
}

#[test]
fn file_evaluator_accepts_the_full_envelope() {
    let path = std::env::temp_dir().join("recorder_eval_envelope.json");
    std::fs::write(
        &path,
        r##"{"ok": true, "results": [{"selector": "#a", "error": "stale frame"}]}"##,
    )
    .expect("temp write");

    let mut evaluator = FileEvaluator::new(path.to_string_lossy().to_string());
    let response = evaluator.evaluate(&[]);

    assert!(response.ok);
    assert_eq!(response.results[0].error.as_deref(), Some("stale frame"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_evaluation_file_degrades_to_failure() {
    let mut evaluator = FileEvaluator::new("/nonexistent/recorder_eval.json");
    let response = evaluator.evaluate(&[]);

    assert!(!response.ok);
    assert!(response.results.is_empty());
}

// ============================================================================
// Round-trip failure paths (no endpoint configured)
// ============================================================================

fn context() -> RequestContext {
    RequestContext {
        tab_id: None,
        test_name: "recorded test".to_string(),
        page_url: String::new(),
        framework: "playwright".to_string(),
        language: "python".to_string(),
        model_override: None,
    }
}

#[test]
fn missing_endpoint_fails_closed_with_a_reason() {
    let event = RecordedEvent::new(ActionKind::Click, "button");

    let outcome = suggest_selectors(
        &event,
        &context(),
        &AiSettings::default(),
        None,
        &TraceLogger::disabled(),
    );

    assert!(!outcome.ok);
    assert!(outcome.reason.is_some());
    assert!(outcome.candidates.is_empty());
}

#[test]
fn review_without_endpoint_keeps_the_original_code() {
    let outcome = review_code(
        "x = 1",
        "recorded test",
        None,
        &AiSettings::default(),
        &TraceLogger::disabled(),
    );

    assert!(!outcome.ok);
    assert!(outcome.reason.is_some());
    assert_eq!(outcome.updated_code, "x = 1");
}
