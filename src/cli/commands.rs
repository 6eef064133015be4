use crate::ai::client::AiSettings;
use crate::ai::error::PipelineError;
use crate::ai::request::RequestContext;
use crate::ai::response::{normalize_selector_response, parse_json_from_text};
use crate::candidate::candidate_model::SelectorCandidate;
use crate::candidate::merge::merge_evaluations;
use crate::codegen::generator::generate;
use crate::evaluate::evaluator::{FileEvaluator, SelectorEvaluator, probes_for};
use crate::event::event_model::RecordedEvent;
use crate::trace::{logger::TraceLogger, trace::TraceEvent};
use crate::{review_code, suggest_selectors};

// ============================================================================
// normalize subcommand
// ============================================================================

/// Normalize a raw AI response file into a candidate list, optionally merging
/// page-evaluation results. A body that is not JSON by any recovery strategy
/// degrades to zero candidates, reported as "no candidates".
pub fn cmd_normalize(
    response_path: &str,
    evaluations: Option<&str>,
    output: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(response_path)?;

    let candidates = match parse_json_from_text(&raw) {
        Some(payload) => normalize_selector_response(&payload).candidates,
        None => Vec::new(),
    };

    if verbose > 0 {
        eprintln!(
            "Recovered {} candidate(s) from {}",
            candidates.len(),
            response_path
        );
    }

    let candidates = merge_from_file(candidates, evaluations);

    if candidates.is_empty() {
        println!("no candidates");
        return Ok(());
    }

    let rendered = serde_json::to_string_pretty(&candidates)?;
    write_or_print(output, &rendered)?;
    Ok(())
}

// ============================================================================
// generate subcommand
// ============================================================================

pub fn cmd_generate(
    events_path: &str,
    framework: &str,
    language: &str,
    output: Option<&str>,
    verbose: u8,
    tracer: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let events = load_events(events_path)?;

    if verbose > 0 {
        eprintln!(
            "Generating {}/{} source for {} event(s)",
            framework,
            language,
            events.len()
        );
    }

    let source = generate(&events, framework, language);
    if source.is_empty() {
        eprintln!(
            "Unsupported framework/language combination: {}/{}",
            framework, language
        );
    }

    tracer.record(&TraceEvent::now("code_generated").with_detail(format!(
        "{}/{} ({} lines)",
        framework,
        language,
        source.lines().count()
    )));

    write_or_print(output, &source)?;
    Ok(())
}

// ============================================================================
// suggest subcommand
// ============================================================================

/// Run the full selector-resolution round-trip for one recorded event.
/// Returns whether the outcome was ok.
pub fn cmd_suggest(
    events_path: &str,
    index: Option<usize>,
    evaluations: Option<&str>,
    test_name: &str,
    url: &str,
    framework: &str,
    language: &str,
    settings: &AiSettings,
    tracer: &TraceLogger,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let events = load_events(events_path)?;

    let event = match index {
        Some(index) => events.get(index),
        None => events.last(),
    };
    let Some(event) = event else {
        eprintln!("No event to resolve in {}", events_path);
        return Ok(false);
    };

    if verbose > 0 {
        eprintln!("Resolving selectors for a {:?} event on <{}>", event.action, event.tag);
    }

    let context = RequestContext {
        tab_id: None,
        test_name: test_name.to_string(),
        page_url: url.to_string(),
        framework: framework.to_string(),
        language: language.to_string(),
        model_override: None,
    };

    let mut file_evaluator;
    let evaluator: Option<&mut dyn SelectorEvaluator> = match evaluations {
        Some(path) => {
            file_evaluator = FileEvaluator::new(path);
            Some(&mut file_evaluator)
        }
        None => None,
    };

    let outcome = suggest_selectors(event, &context, settings, evaluator, tracer);

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(outcome.ok)
}

// ============================================================================
// review subcommand
// ============================================================================

/// Send a source file out for AI review and emit the updated code.
/// Returns whether the outcome was ok.
pub fn cmd_review(
    code_path: &str,
    test_name: &str,
    output: Option<&str>,
    settings: &AiSettings,
    tracer: &TraceLogger,
) -> Result<bool, Box<dyn std::error::Error>> {
    let code = read_input(code_path)?;

    let outcome = review_code(&code, test_name, None, settings, tracer);

    if let Some(reason) = &outcome.reason {
        eprintln!("Review failed: {}", reason);
    }
    if !outcome.summary.is_empty() {
        eprintln!("Summary: {}", outcome.summary);
    }
    for suggestion in &outcome.suggestions {
        eprintln!("  - {}", suggestion);
    }

    write_or_print(output, &outcome.updated_code)?;
    Ok(outcome.ok)
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Load a recorded-event list from a JSON or YAML file (by extension).
pub fn load_events(path: &str) -> Result<Vec<RecordedEvent>, Box<dyn std::error::Error>> {
    let content = read_input(path)?;
    let events = if path.ends_with(".yaml") || path.ends_with(".yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(events)
}

fn merge_from_file(
    candidates: Vec<SelectorCandidate>,
    evaluations: Option<&str>,
) -> Vec<SelectorCandidate> {
    let Some(path) = evaluations else {
        return candidates;
    };

    let mut evaluator = FileEvaluator::new(path);
    let response = evaluator.evaluate(&probes_for(&candidates));
    if response.ok {
        merge_evaluations(&candidates, &response.results)
    } else {
        candidates
    }
}

fn read_input(path: &str) -> Result<String, PipelineError> {
    std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_string(),
        source,
    })
}

fn write_or_print(output: Option<&str>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{}", content),
    }
    Ok(())
}
