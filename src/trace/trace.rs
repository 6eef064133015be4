use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One pipeline trace record, appended as a JSONL line.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,

    /// Pipeline stage: request_issued, response_normalized,
    /// evaluation_merged, code_generated, request_failed.
    pub stage: String,

    pub request_id: Option<String>,
    pub detail: Option<String>,
    pub candidate_count: Option<usize>,
    pub ok: Option<bool>,
}

impl TraceEvent {
    pub fn now(stage: &str) -> Self {
        TraceEvent {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            stage: stage.to_string(),
            request_id: None,
            detail: None,
            candidate_count: None,
            ok: None,
        }
    }

    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_candidates(mut self, count: usize) -> Self {
        self.candidate_count = Some(count);
        self
    }

    pub fn with_ok(mut self, ok: bool) -> Self {
        self.ok = Some(ok);
        self
    }
}
