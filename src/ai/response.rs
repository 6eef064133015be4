use serde::Serialize;
use serde_json::Value;

use crate::candidate::candidate_model::SelectorCandidate;
use crate::candidate::dedupe::dedupe;
use crate::candidate::extract::extract;

// ============================================================================
// Response normalization — raw AI payload in, bounded candidate list out
// ============================================================================

/// Upper bound on candidates handed to the UI and codegen per response.
pub const MAX_CANDIDATES: usize = 12;

/// Rationale used when the AI supplied none.
pub const DEFAULT_REASON: &str = "suggested by AI analysis";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedCandidates {
    pub candidates: Vec<SelectorCandidate>,
}

/// Turn a raw suggestion payload into a bounded, de-duplicated candidate
/// list. Truncation keeps the first entries by discovery order; ranking by
/// score is left to the caller.
pub fn normalize_selector_response(raw: &Value) -> NormalizedCandidates {
    let mut candidates = dedupe(extract(raw));

    for candidate in &mut candidates {
        let missing_reason = candidate
            .reason
            .as_deref()
            .map_or(true, |reason| reason.trim().is_empty());
        if missing_reason {
            candidate.reason = Some(DEFAULT_REASON.to_string());
        }
    }

    candidates.truncate(MAX_CANDIDATES);
    NormalizedCandidates { candidates }
}

/// Normalized code-review payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeReview {
    pub ok: bool,
    pub updated_code: String,
    pub summary: String,
    pub suggestions: Vec<String>,
}

/// Normalize a code-review response. Tolerates the payload directly or
/// wrapped one level under `result`; each field falls back through its
/// known aliases, and the code field falls back to the caller's original
/// source text.
pub fn normalize_review_response(raw: &Value, fallback_code: &str) -> CodeReview {
    let payload = match raw.get("result") {
        Some(inner) if inner.is_object() => inner,
        _ => raw,
    };

    let updated_code = first_string(payload, &["updatedCode", "code"])
        .unwrap_or_else(|| fallback_code.to_string());
    let summary = first_string(payload, &["summary", "overview"]).unwrap_or_default();
    let suggestions = first_string_list(payload, &["suggestions", "changes", "recommendations"]);

    CodeReview {
        ok: true,
        updated_code,
        summary,
        suggestions,
    }
}

fn first_string(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        payload
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}

fn first_string_list(payload: &Value, keys: &[&str]) -> Vec<String> {
    for key in keys {
        if let Some(items) = payload.get(key).and_then(Value::as_array) {
            return items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
    }
    Vec::new()
}

// ============================================================================
// Tolerant text-to-JSON recovery
// ============================================================================

/// Recover a JSON value from free text. Strategies in order: direct parse,
/// the first fenced code block (optional `json` language tag), the first
/// balanced `{...}` substring. First success wins; None when all fail.
pub fn parse_json_from_text(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    if let Some(block) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str(block.trim()) {
            return Some(value);
        }
    }

    if let Some(body) = balanced_object(trimmed) {
        if let Ok(value) = serde_json::from_str(body) {
            return Some(value);
        }
    }

    None
}

/// Contents of the first triple-backtick fence, tolerating a `json` tag.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let body = &text[start + 3..];
    let body = body.strip_prefix("json").unwrap_or(body);
    let end = body.find("```")?;
    Some(&body[..end])
}

/// First `{...}` substring with balanced braces, ignoring braces inside
/// string literals.
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if *byte == b'\\' {
                escaped = true;
            } else if *byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
