use std::collections::HashSet;

use serde_json::Value;

use crate::candidate::candidate_model::SelectorCandidate;
use crate::candidate::coerce::{coerce_object, coerce_text};

// ============================================================================
// Candidate extraction — walk an arbitrary payload, collect candidate shapes
// ============================================================================

/// Keys under which AI backends commonly nest their suggestion lists.
/// Scanned in this order before any remaining keys.
const CONTAINER_KEYS: [&str; 8] = [
    "candidates",
    "selectors",
    "suggestions",
    "results",
    "items",
    "data",
    "options",
    "alternatives",
];

/// Hard stop for pathologically deep payloads.
const MAX_DEPTH: usize = 64;

/// Walk an arbitrary JSON-like payload and pull out every fragment that looks
/// like a selector candidate, in discovery order. Duplicates and near-misses
/// are left for the deduplicator to resolve. Never fails on malformed input.
pub fn extract(source: &Value) -> Vec<SelectorCandidate> {
    let mut found = Vec::new();
    let mut visited = HashSet::new();
    walk(source, 0, &mut visited, &mut found);
    found
}

fn walk(
    node: &Value,
    depth: usize,
    visited: &mut HashSet<usize>,
    found: &mut Vec<SelectorCandidate>,
) {
    if depth > MAX_DEPTH {
        return;
    }

    match node {
        Value::Null | Value::Bool(_) | Value::Number(_) => {}

        // Free-text blocks carry one suggestion per line.
        Value::String(text) => found.extend(coerce_text(text)),

        Value::Array(items) => {
            if !visited.insert(node as *const Value as usize) {
                return;
            }
            for item in items {
                walk(item, depth + 1, visited, found);
            }
        }

        Value::Object(map) => {
            if !visited.insert(node as *const Value as usize) {
                return;
            }

            // An object that coerces directly is a terminal candidate,
            // not a container.
            if let Some(candidate) = coerce_object(map) {
                found.push(candidate);
                return;
            }

            for key in CONTAINER_KEYS {
                if let Some(child) = map.get(key) {
                    walk(child, depth + 1, visited, found);
                }
            }

            // Unknown backends nest under arbitrary keys; descend into any
            // remaining structured values.
            for (key, child) in map {
                if CONTAINER_KEYS.contains(&key.as_str()) {
                    continue;
                }
                if child.is_array() || child.is_object() {
                    walk(child, depth + 1, visited, found);
                }
            }
        }
    }
}
