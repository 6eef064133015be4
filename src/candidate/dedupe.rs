use std::collections::HashSet;

use crate::candidate::candidate_model::SelectorCandidate;

/// Collapse candidates to a canonical set keyed by `selector::type`.
///
/// First occurrence wins and original order is preserved. Candidates whose
/// selector is empty after trimming are dropped; kept candidates store the
/// trimmed selector text back. Idempotent.
pub fn dedupe(candidates: Vec<SelectorCandidate>) -> Vec<SelectorCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut canonical = Vec::with_capacity(candidates.len());

    for mut candidate in candidates {
        let trimmed = candidate.selector.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.len() != candidate.selector.len() {
            candidate.selector = trimmed.to_string();
        }

        if seen.insert(candidate.identity_key()) {
            canonical.push(candidate);
        }
    }

    canonical
}
