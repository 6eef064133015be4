use serde::Serialize;

use crate::ai::client::{AiClient, AiSettings};
use crate::ai::error::PipelineError;
use crate::ai::request::{RequestContext, build_review_request, build_selector_request};
use crate::ai::response::{
    normalize_review_response, normalize_selector_response, parse_json_from_text,
};
use crate::candidate::candidate_model::SelectorCandidate;
use crate::candidate::merge::merge_evaluations;
use crate::evaluate::evaluator::{SelectorEvaluator, probes_for};
use crate::event::event_model::RecordedEvent;
use crate::trace::{logger::TraceLogger, trace::TraceEvent};

pub mod ai;
pub mod candidate;
pub mod cli;
pub mod codegen;
pub mod evaluate;
pub mod event;
pub mod trace;

// ============================================================================
// Selector-resolution round-trip
// ============================================================================

/// Outcome of a full selector-resolution round-trip. Failure is always a
/// value here, never a panic: the triggering data originates from an
/// untrusted external service.
#[derive(Debug, Serialize)]
pub struct SuggestOutcome {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    pub candidates: Vec<SelectorCandidate>,
}

impl SuggestOutcome {
    fn failed(reason: String) -> Self {
        SuggestOutcome {
            ok: false,
            reason: Some(reason),
            candidates: Vec::new(),
        }
    }
}

/// Build and POST a suggestion request, recover and normalize the response,
/// then optionally probe the page evaluator and merge its results. At most
/// one outbound round-trip and one evaluation pass occur per call; an absent
/// or failing evaluator degrades to un-merged candidates.
pub fn suggest_selectors(
    event: &RecordedEvent,
    context: &RequestContext,
    settings: &AiSettings,
    evaluator: Option<&mut dyn SelectorEvaluator>,
    tracer: &TraceLogger,
) -> SuggestOutcome {
    let request = build_selector_request(event, context, settings);

    let client = match AiClient::new(settings.clone()) {
        Ok(client) => client,
        Err(error) => return fail_request(&request.request_id, error, tracer),
    };

    tracer.record(
        &TraceEvent::now("request_issued")
            .with_request_id(&request.request_id)
            .with_detail(&request.model),
    );

    let body = match client.post(&request) {
        Ok(body) => body,
        Err(error) => return fail_request(&request.request_id, error, tracer),
    };

    let candidates = match parse_json_from_text(&body) {
        Some(payload) => normalize_selector_response(&payload).candidates,
        None => Vec::new(),
    };

    tracer.record(
        &TraceEvent::now("response_normalized")
            .with_request_id(&request.request_id)
            .with_candidates(candidates.len()),
    );

    if candidates.is_empty() {
        return SuggestOutcome {
            ok: false,
            reason: Some("no candidates".to_string()),
            candidates,
        };
    }

    let candidates = match evaluator {
        Some(evaluator) => {
            let probes = probes_for(&candidates);
            let response = evaluator.evaluate(&probes);
            tracer.record(
                &TraceEvent::now("evaluation_merged")
                    .with_request_id(&request.request_id)
                    .with_candidates(probes.len())
                    .with_ok(response.ok),
            );
            if response.ok {
                merge_evaluations(&candidates, &response.results)
            } else {
                candidates
            }
        }
        None => candidates,
    };

    SuggestOutcome {
        ok: true,
        reason: None,
        candidates,
    }
}

fn fail_request(request_id: &str, error: PipelineError, tracer: &TraceLogger) -> SuggestOutcome {
    let reason = error.to_string();
    tracer.record(
        &TraceEvent::now("request_failed")
            .with_request_id(request_id)
            .with_detail(&reason),
    );
    SuggestOutcome::failed(reason)
}

// ============================================================================
// Code-review round-trip
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ReviewOutcome {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    pub updated_code: String,
    pub summary: String,
    pub suggestions: Vec<String>,
}

/// Send source text out for AI review. Transport failures keep the caller's
/// code untouched; a response that is not JSON by any recovery strategy is
/// treated as the literal updated code.
pub fn review_code(
    code: &str,
    test_name: &str,
    model_override: Option<&str>,
    settings: &AiSettings,
    tracer: &TraceLogger,
) -> ReviewOutcome {
    let request = build_review_request(code, test_name, model_override, settings);

    let client = match AiClient::new(settings.clone()) {
        Ok(client) => client,
        Err(error) => return fail_review(code, &request.request_id, error, tracer),
    };

    tracer.record(
        &TraceEvent::now("request_issued")
            .with_request_id(&request.request_id)
            .with_detail(&request.model),
    );

    let body = match client.post(&request) {
        Ok(body) => body,
        Err(error) => return fail_review(code, &request.request_id, error, tracer),
    };

    match parse_json_from_text(&body) {
        Some(payload) => {
            let review = normalize_review_response(&payload, code);
            ReviewOutcome {
                ok: review.ok,
                reason: None,
                updated_code: review.updated_code,
                summary: review.summary,
                suggestions: review.suggestions,
            }
        }
        None => ReviewOutcome {
            ok: true,
            reason: None,
            updated_code: body.trim().to_string(),
            summary: String::new(),
            suggestions: Vec::new(),
        },
    }
}

fn fail_review(
    code: &str,
    request_id: &str,
    error: PipelineError,
    tracer: &TraceLogger,
) -> ReviewOutcome {
    let reason = error.to_string();
    tracer.record(
        &TraceEvent::now("request_failed")
            .with_request_id(request_id)
            .with_detail(&reason),
    );
    ReviewOutcome {
        ok: false,
        reason: Some(reason),
        updated_code: code.to_string(),
        summary: String::new(),
        suggestions: Vec::new(),
    }
}
