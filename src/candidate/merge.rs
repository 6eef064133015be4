use std::collections::HashMap;

use crate::candidate::candidate_model::{EvaluationResult, SelectorCandidate};

// ============================================================================
// Evaluation merging — fold live page-match results into candidate records
// ============================================================================

/// Message used when an evaluation reports an error with no usable text.
const FALLBACK_ERROR_NOTE: &str = "validation failed";

/// Separator between an existing rationale and an appended evaluation note.
const REASON_SEPARATOR: &str = " • ";

/// Fold evaluation results into a candidate list. Pure: inputs are not
/// mutated, a new list is returned. Evaluations are matched by the full
/// identity key first, then by bare selector text; candidates with no
/// matching evaluation pass through unchanged.
pub fn merge_evaluations(
    candidates: &[SelectorCandidate],
    evaluations: &[EvaluationResult],
) -> Vec<SelectorCandidate> {
    let mut lookup: HashMap<String, &EvaluationResult> = HashMap::new();
    for evaluation in evaluations {
        lookup.entry(evaluation.identity_key()).or_insert(evaluation);
        // Selector-only fallback for candidates whose type was never inferred.
        lookup
            .entry(evaluation.selector.clone())
            .or_insert(evaluation);
    }

    candidates
        .iter()
        .map(|candidate| {
            let evaluation = lookup
                .get(candidate.identity_key().as_str())
                .or_else(|| lookup.get(candidate.selector.as_str()));
            match evaluation {
                Some(evaluation) => apply_evaluation(candidate.clone(), evaluation),
                None => candidate.clone(),
            }
        })
        .collect()
}

fn apply_evaluation(
    mut candidate: SelectorCandidate,
    evaluation: &EvaluationResult,
) -> SelectorCandidate {
    if let Some(count) = evaluation.match_count {
        candidate.match_count = Some(count);
        // A live count overrides any prior uniqueness claim.
        candidate.unique = Some(count == 1);
    } else if evaluation.unique == Some(true) {
        candidate.unique = Some(true);
    }

    if let Some(error) = &evaluation.error {
        let note = if error.trim().is_empty() {
            FALLBACK_ERROR_NOTE
        } else {
            error.trim()
        };
        candidate.reason = Some(append_note(candidate.reason.take(), note));
    } else if let Some(count) = evaluation.match_count {
        let note = match_note(count);
        candidate.reason = Some(append_note(candidate.reason.take(), &note));
    }

    if candidate.score.is_none() {
        if let Some(count) = evaluation.match_count {
            candidate.score = Some(derive_score(count));
        }
    }

    candidate
}

/// Append an evaluation note to an existing rationale rather than replacing it.
fn append_note(existing: Option<String>, note: &str) -> String {
    match existing {
        Some(reason) if !reason.trim().is_empty() => {
            format!("{}{}{}", reason, REASON_SEPARATOR, note)
        }
        _ => note.to_string(),
    }
}

fn match_note(count: u64) -> String {
    if count == 1 {
        "unique match on page".to_string()
    } else {
        format!("{} matches on page", count)
    }
}

/// Score from live match counts: a unique match is trusted highly, ambiguity
/// is penalized per extra match down to a floor.
fn derive_score(count: u64) -> u8 {
    if count == 1 {
        return 92;
    }
    let penalized = 75_i64 - 8 * count.min(1_000) as i64;
    penalized.max(35) as u8
}
