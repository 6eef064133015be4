use serde_json::{Map, Value};

use crate::candidate::candidate_model::{MatchMode, SelectorCandidate, SelectorType};

// ============================================================================
// Fragment coercion — one raw fragment in, one normalized candidate out
// ============================================================================

/// Coerce a single raw fragment into a candidate. Strings are direct selector
/// literals; objects are matched against the recognized field shapes. Other
/// value kinds never coerce.
pub fn coerce_fragment(fragment: &Value) -> Option<SelectorCandidate> {
    match fragment {
        Value::String(text) => coerce_line(text),
        Value::Object(map) => coerce_object(map),
        _ => None,
    }
}

/// Free-text AI output carries one suggestion per line.
pub fn coerce_text(text: &str) -> Vec<SelectorCandidate> {
    text.lines().filter_map(coerce_line).collect()
}

/// A trimmed non-empty line is a selector literal with no declared type.
pub fn coerce_line(line: &str) -> Option<SelectorCandidate> {
    let selector = line.trim();
    if selector.is_empty() {
        return None;
    }
    Some(SelectorCandidate::new(selector))
}

/// Coerce an object fragment. The primary selector is resolved by an ordered
/// field match (`selector` → `css` → `xpath` → `value` → `text`); secondary
/// fields are copied through when well-typed and silently dropped otherwise.
pub fn coerce_object(map: &Map<String, Value>) -> Option<SelectorCandidate> {
    let primary = primary_selector(map)?;

    let mut candidate = SelectorCandidate::new(primary.selector);
    candidate.selector_type = explicit_type(map).or(primary.selector_type);
    candidate.text_value = primary.text_value;

    candidate.reason = string_field(map, &["reason", "explanation"]);
    candidate.score = score_field(map);
    candidate.unique = bool_field(map, "unique");
    candidate.match_count = count_field(map, &["matchCount", "match_count"]);
    candidate.match_mode = mode_field(map, &["matchMode", "match_mode"]);

    if candidate.text_value.is_none() {
        candidate.text_value = string_field(map, &["textValue", "text_value"]);
    }

    Some(candidate)
}

struct PrimarySelector {
    selector: String,
    selector_type: Option<SelectorType>,
    text_value: Option<String>,
}

/// Ordered-precedence match over the recognized selector-bearing fields.
/// First usable field wins.
fn primary_selector(map: &Map<String, Value>) -> Option<PrimarySelector> {
    if let Some(selector) = nonempty_string(map, "selector") {
        return Some(PrimarySelector {
            selector,
            selector_type: None,
            text_value: None,
        });
    }

    if let Some(selector) = nonempty_string(map, "css") {
        return Some(PrimarySelector {
            selector,
            selector_type: Some(SelectorType::Css),
            text_value: None,
        });
    }

    if let Some(raw) = nonempty_string(map, "xpath") {
        let selector = if raw.starts_with("xpath=") {
            raw
        } else {
            format!("xpath={}", raw)
        };
        return Some(PrimarySelector {
            selector,
            selector_type: Some(SelectorType::Xpath),
            text_value: None,
        });
    }

    if let Some(selector) = nonempty_string(map, "value") {
        return Some(PrimarySelector {
            selector,
            selector_type: None,
            text_value: None,
        });
    }

    if let Some(raw) = nonempty_string(map, "text") {
        if raw.starts_with("text=") {
            let text_value = strip_text_expression(&raw);
            return Some(PrimarySelector {
                selector: raw,
                selector_type: Some(SelectorType::Text),
                text_value: Some(text_value),
            });
        }
        let selector = format!("text=\"{}\"", raw);
        return Some(PrimarySelector {
            selector,
            selector_type: Some(SelectorType::Text),
            text_value: Some(raw),
        });
    }

    None
}

/// Strip the `text=` prefix and one pair of surrounding quotes.
fn strip_text_expression(expression: &str) -> String {
    let body = expression.strip_prefix("text=").unwrap_or(expression).trim();
    let body = body
        .strip_prefix('"')
        .and_then(|b| b.strip_suffix('"'))
        .or_else(|| body.strip_prefix('\'').and_then(|b| b.strip_suffix('\'')))
        .unwrap_or(body);
    body.to_string()
}

/// An explicit `type` tag names css/xpath/text and overrides field inference.
fn explicit_type(map: &Map<String, Value>) -> Option<SelectorType> {
    map.get("type")
        .and_then(Value::as_str)
        .and_then(SelectorType::parse)
}

fn nonempty_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    let raw = map.get(key)?.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.to_string())
}

fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| nonempty_string(map, key))
}

fn bool_field(map: &Map<String, Value>, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

fn count_field(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_u64))
}

fn mode_field(map: &Map<String, Value>, keys: &[&str]) -> Option<MatchMode> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .and_then(MatchMode::parse)
}

/// `score` is integer-rounded and clamped to 0-100. When absent, `confidence`
/// stands in: values at or below 1 are a fraction and scale by 100, larger
/// values are already percentages.
fn score_field(map: &Map<String, Value>) -> Option<u8> {
    if let Some(score) = map.get("score").and_then(Value::as_f64) {
        return Some(clamp_score(score));
    }
    if let Some(confidence) = map.get("confidence").and_then(Value::as_f64) {
        let scaled = if confidence <= 1.0 {
            confidence * 100.0
        } else {
            confidence
        };
        return Some(clamp_score(scaled));
    }
    None
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
