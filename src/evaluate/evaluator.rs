use serde::{Deserialize, Serialize};

use crate::candidate::candidate_model::{EvaluationProbe, EvaluationResult, SelectorCandidate};

// ============================================================================
// SelectorEvaluator trait — seam to the live page-evaluation collaborator
// ============================================================================

/// Answer from the page-evaluation collaborator. A not-ok answer carries no
/// usable results and the pipeline proceeds with un-merged candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub ok: bool,

    #[serde(default)]
    pub results: Vec<EvaluationResult>,
}

impl EvaluationResponse {
    pub fn failed() -> Self {
        EvaluationResponse {
            ok: false,
            results: Vec::new(),
        }
    }
}

/// Measures how many live DOM nodes each probe matches. The execution lives
/// outside this crate; implementations here only carry its output back.
pub trait SelectorEvaluator {
    fn evaluate(&mut self, probes: &[EvaluationProbe]) -> EvaluationResponse;
}

/// Build the outbound probe triples for a candidate list.
pub fn probes_for(candidates: &[SelectorCandidate]) -> Vec<EvaluationProbe> {
    candidates
        .iter()
        .map(|candidate| EvaluationProbe {
            selector: candidate.selector.clone(),
            selector_type: candidate.selector_type,
            match_mode: candidate.match_mode,
        })
        .collect()
}

// ============================================================================
// MockEvaluator — canned answers for tests and offline runs
// ============================================================================

pub struct MockEvaluator {
    pub response: EvaluationResponse,
}

impl MockEvaluator {
    pub fn with_results(results: Vec<EvaluationResult>) -> Self {
        MockEvaluator {
            response: EvaluationResponse { ok: true, results },
        }
    }
}

impl SelectorEvaluator for MockEvaluator {
    fn evaluate(&mut self, _probes: &[EvaluationProbe]) -> EvaluationResponse {
        self.response.clone()
    }
}

// ============================================================================
// FileEvaluator — results captured by an external page probe, read from disk
// ============================================================================

/// Reads an evaluation response from a JSON file. Accepts either the full
/// `{ok, results}` envelope or a bare results array. Missing or malformed
/// files degrade to a failed response with a stderr warning.
pub struct FileEvaluator {
    path: String,
}

impl FileEvaluator {
    pub fn new(path: impl Into<String>) -> Self {
        FileEvaluator { path: path.into() }
    }
}

impl SelectorEvaluator for FileEvaluator {
    fn evaluate(&mut self, _probes: &[EvaluationProbe]) -> EvaluationResponse {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) => {
                eprintln!(
                    "Warning: could not read evaluation file '{}': {}",
                    self.path, error
                );
                return EvaluationResponse::failed();
            }
        };

        if let Ok(response) = serde_json::from_str::<EvaluationResponse>(&content) {
            return response;
        }
        if let Ok(results) = serde_json::from_str::<Vec<EvaluationResult>>(&content) {
            return EvaluationResponse { ok: true, results };
        }

        eprintln!(
            "Warning: evaluation file '{}' is not a results payload",
            self.path
        );
        EvaluationResponse::failed()
    }
}
