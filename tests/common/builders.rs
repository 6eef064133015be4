#![allow(dead_code)]

use test_recorder::candidate::candidate_model::{
    EvaluationResult, SelectorCandidate, SelectorType,
};
use test_recorder::event::event_model::{ActionKind, RecordedEvent};

pub fn candidate(selector: &str) -> SelectorCandidate {
    SelectorCandidate::new(selector)
}

pub fn typed_candidate(selector: &str, selector_type: SelectorType) -> SelectorCandidate {
    let mut candidate = SelectorCandidate::new(selector);
    candidate.selector_type = Some(selector_type);
    candidate
}

pub fn counted_evaluation(selector: &str, match_count: u64) -> EvaluationResult {
    EvaluationResult {
        selector: selector.to_string(),
        selector_type: None,
        match_count: Some(match_count),
        unique: None,
        error: None,
    }
}

pub fn failed_evaluation(selector: &str, error: &str) -> EvaluationResult {
    EvaluationResult {
        selector: selector.to_string(),
        selector_type: None,
        match_count: None,
        unique: None,
        error: Some(error.to_string()),
    }
}

pub fn click_event(selector: &str) -> RecordedEvent {
    let mut event = RecordedEvent::new(ActionKind::Click, "button");
    event.primary_selector = Some(selector.to_string());
    event
}

pub fn input_event(selector: &str, value: &str) -> RecordedEvent {
    let mut event = RecordedEvent::new(ActionKind::Input, "input");
    event.primary_selector = Some(selector.to_string());
    event.value = Some(value.to_string());
    event
}
