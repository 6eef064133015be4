use serde_json::json;

use test_recorder::candidate::{
    candidate_model::{EvaluationResult, SelectorType},
    coerce::coerce_fragment,
    dedupe::dedupe,
    extract::extract,
    merge::merge_evaluations,
};

use crate::common::builders::{candidate, counted_evaluation, failed_evaluation, typed_candidate};

mod common;

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn nested_payload_extracts_in_discovery_order() {
    let payload = json!({"results": [{"css": "#a"}, "  #b  \n.c"]});
    let found = dedupe(extract(&payload));

    assert_eq!(found.len(), 3);
    assert_eq!(found[0].selector, "#a");
    assert_eq!(found[0].selector_type, Some(SelectorType::Css));
    assert_eq!(found[1].selector, "#b");
    assert_eq!(found[1].selector_type, None);
    assert_eq!(found[2].selector, ".c");
}

#[test]
fn extraction_descends_through_unknown_wrapper_keys() {
    let payload = json!({
        "payload": {
            "inner": {
                "suggestions": ["#x", {"xpath": "//div[@id='y']"}]
            }
        }
    });
    let found = extract(&payload);

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].selector, "#x");
    assert_eq!(found[1].selector, "xpath=//div[@id='y']");
    assert_eq!(found[1].selector_type, Some(SelectorType::Xpath));
}

#[test]
fn coercible_objects_are_terminal_not_containers() {
    // The nested "candidates" key must be ignored once the object itself coerces.
    let payload = json!({"selector": "#outer", "candidates": ["#inner"]});
    let found = extract(&payload);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].selector, "#outer");
}

#[test]
fn extraction_terminates_on_pathological_nesting() {
    let mut payload = json!({"selector": "#leaf"});
    for _ in 0..500 {
        payload = json!({"wrapper": payload});
    }

    let found = extract(&payload);
    assert!(found.len() <= 1);
}

#[test]
fn null_and_scalar_payloads_extract_nothing() {
    assert!(extract(&json!(null)).is_empty());
    assert!(extract(&json!(42)).is_empty());
    assert!(extract(&json!(true)).is_empty());
}

// ============================================================================
// Coercion
// ============================================================================

#[test]
fn object_fields_resolve_in_precedence_order() {
    let fragment = json!({"css": "#primary", "xpath": "//ignored", "text": "ignored"});
    let coerced = coerce_fragment(&fragment).expect("css object must coerce");

    assert_eq!(coerced.selector, "#primary");
    assert_eq!(coerced.selector_type, Some(SelectorType::Css));
}

#[test]
fn xpath_field_gains_the_wrapper_once() {
    let coerced = coerce_fragment(&json!({"xpath": "//a[1]"})).expect("must coerce");
    assert_eq!(coerced.selector, "xpath=//a[1]");

    let already = coerce_fragment(&json!({"xpath": "xpath=//a[1]"})).expect("must coerce");
    assert_eq!(already.selector, "xpath=//a[1]");
}

#[test]
fn text_field_is_wrapped_and_text_value_derived() {
    let coerced = coerce_fragment(&json!({"text": "Sign in"})).expect("must coerce");

    assert_eq!(coerced.selector, "text=\"Sign in\"");
    assert_eq!(coerced.selector_type, Some(SelectorType::Text));
    assert_eq!(coerced.text_value.as_deref(), Some("Sign in"));
}

#[test]
fn existing_text_expression_is_kept_and_unquoted() {
    let coerced =
        coerce_fragment(&json!({"text": "text=\"Log out\""})).expect("must coerce");

    assert_eq!(coerced.selector, "text=\"Log out\"");
    assert_eq!(coerced.text_value.as_deref(), Some("Log out"));
}

#[test]
fn fractional_confidence_scales_to_percent() {
    let fractional = coerce_fragment(&json!({"selector": "#a", "confidence": 0.87}))
        .expect("must coerce");
    assert_eq!(fractional.score, Some(87));

    let percentage = coerce_fragment(&json!({"selector": "#a", "confidence": 64.0}))
        .expect("must coerce");
    assert_eq!(percentage.score, Some(64));
}

#[test]
fn explicit_score_wins_over_confidence() {
    let coerced = coerce_fragment(&json!({"selector": "#a", "score": 81.4, "confidence": 0.2}))
        .expect("must coerce");
    assert_eq!(coerced.score, Some(81));
}

#[test]
fn explanation_stands_in_for_reason() {
    let coerced = coerce_fragment(&json!({"selector": "#a", "explanation": "stable id"}))
        .expect("must coerce");
    assert_eq!(coerced.reason.as_deref(), Some("stable id"));
}

#[test]
fn malformed_secondary_fields_are_dropped_not_fatal() {
    let coerced = coerce_fragment(
        &json!({"selector": "#a", "score": "high", "unique": "yes", "matchCount": -3}),
    )
    .expect("selector is still usable");

    assert_eq!(coerced.selector, "#a");
    assert_eq!(coerced.score, None);
    assert_eq!(coerced.unique, None);
    assert_eq!(coerced.match_count, None);
}

#[test]
fn empty_fragments_are_rejected() {
    assert!(coerce_fragment(&json!("   ")).is_none());
    assert!(coerce_fragment(&json!({"selector": "  "})).is_none());
    assert!(coerce_fragment(&json!(42)).is_none());
}

// ============================================================================
// Deduplication
// ============================================================================

#[test]
fn dedupe_is_idempotent() {
    let list = vec![
        candidate("#a"),
        candidate(" #a "),
        typed_candidate("#a", SelectorType::Css),
        candidate(""),
        candidate(".b"),
    ];

    let once = dedupe(list);
    let twice = dedupe(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn dedupe_output_has_unique_identity_keys() {
    let list = vec![
        candidate("#a"),
        candidate("#a"),
        typed_candidate("#a", SelectorType::Css),
        candidate(".b"),
    ];

    let deduped = dedupe(list);

    let mut keys: Vec<String> = deduped.iter().map(|c| c.identity_key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), deduped.len());

    // Same selector text with a declared type is a distinct candidate.
    assert_eq!(deduped.len(), 3);
}

#[test]
fn dedupe_keeps_first_occurrence_and_trims() {
    let mut first = candidate(" #a ");
    first.reason = Some("first".to_string());
    let mut second = candidate("#a");
    second.reason = Some("second".to_string());

    let deduped = dedupe(vec![first, second]);

    assert_eq!(deduped.len(), 1);
    assert_eq!(deduped[0].selector, "#a");
    assert_eq!(deduped[0].reason.as_deref(), Some("first"));
}

// ============================================================================
// Evaluation merging
// ============================================================================

#[test]
fn unique_match_scores_high() {
    let merged = merge_evaluations(&[candidate("#a")], &[counted_evaluation("#a", 1)]);

    assert_eq!(merged[0].score, Some(92));
    assert_eq!(merged[0].unique, Some(true));
    assert_eq!(merged[0].match_count, Some(1));
    assert_eq!(merged[0].reason.as_deref(), Some("unique match on page"));
}

#[test]
fn ambiguous_match_is_penalized_to_the_floor() {
    let merged = merge_evaluations(&[candidate("#a")], &[counted_evaluation("#a", 5)]);

    assert_eq!(merged[0].score, Some(35));
    assert_eq!(merged[0].unique, Some(false));
    assert_eq!(merged[0].reason.as_deref(), Some("5 matches on page"));
}

#[test]
fn moderate_ambiguity_scores_between_floor_and_ceiling() {
    let merged = merge_evaluations(&[candidate("#a")], &[counted_evaluation("#a", 2)]);
    assert_eq!(merged[0].score, Some(59));
}

#[test]
fn prior_score_survives_merging() {
    let mut scored = candidate("#a");
    scored.score = Some(40);

    let merged = merge_evaluations(&[scored], &[counted_evaluation("#a", 1)]);

    assert_eq!(merged[0].score, Some(40));
    assert_eq!(merged[0].unique, Some(true));
}

#[test]
fn evaluation_error_appends_to_reason() {
    let mut flagged = candidate("#a");
    flagged.reason = Some("AI pick".to_string());

    let merged = merge_evaluations(&[flagged], &[failed_evaluation("#a", "element detached")]);

    assert_eq!(
        merged[0].reason.as_deref(),
        Some("AI pick • element detached")
    );
    assert_eq!(merged[0].score, None);
}

#[test]
fn blank_error_text_uses_fallback_note() {
    let merged = merge_evaluations(&[candidate("#a")], &[failed_evaluation("#a", "  ")]);
    assert_eq!(merged[0].reason.as_deref(), Some("validation failed"));
}

#[test]
fn unmatched_candidates_pass_through_unchanged() {
    let original = vec![candidate("#a"), candidate("#b")];

    let merged = merge_evaluations(&original, &[counted_evaluation("#b", 1)]);

    assert_eq!(merged[0], original[0]);
    assert_eq!(merged[1].score, Some(92));
}

#[test]
fn typed_evaluation_matches_untyped_candidate_via_selector_fallback() {
    let evaluation = EvaluationResult {
        selector: "#a".to_string(),
        selector_type: Some(SelectorType::Css),
        match_count: Some(1),
        unique: None,
        error: None,
    };

    let merged = merge_evaluations(&[candidate("#a")], &[evaluation]);
    assert_eq!(merged[0].match_count, Some(1));
}

#[test]
fn uniqueness_assertion_without_count_sets_unique_only() {
    let evaluation = EvaluationResult {
        selector: "#a".to_string(),
        selector_type: None,
        match_count: None,
        unique: Some(true),
        error: None,
    };

    let merged = merge_evaluations(&[candidate("#a")], &[evaluation]);

    assert_eq!(merged[0].unique, Some(true));
    assert_eq!(merged[0].match_count, None);
    assert_eq!(merged[0].score, None);
}

#[test]
fn merging_does_not_mutate_inputs() {
    let candidates = vec![candidate("#a")];
    let evaluations = vec![counted_evaluation("#a", 1)];

    let _ = merge_evaluations(&candidates, &evaluations);

    assert_eq!(candidates[0].score, None);
    assert_eq!(candidates[0].reason, None);
}
