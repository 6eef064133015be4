use serde::{Deserialize, Serialize};

use crate::candidate::candidate_model::SelectorCandidate;

// ============================================================================
// Recorded interaction events
// ============================================================================

/// Kind of captured user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Click,
    Input,
    Change,
    Submit,
    Navigate,
    /// Recorder-side kinds the pipeline carries but does not render.
    #[serde(other)]
    Other,
}

/// Frame the event was captured in, when the target lives inside an iframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IframeContext {
    pub frame_selector: String,

    #[serde(default)]
    pub frame_url: Option<String>,
}

/// One captured user interaction. Produced by the recorder; the pipeline only
/// ever writes back `primary_selector` when a candidate is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub action: ActionKind,

    /// Milliseconds since epoch at capture time.
    pub timestamp: u64,

    /// Lowercase tag name of the target element.
    pub tag: String,

    #[serde(default)]
    pub value: Option<String>,

    /// Selector chosen for code generation, once one has been applied.
    #[serde(default)]
    pub primary_selector: Option<String>,

    #[serde(default)]
    pub selector_candidates: Vec<SelectorCandidate>,

    #[serde(default)]
    pub iframe_context: Option<IframeContext>,
}

impl RecordedEvent {
    pub fn new(action: ActionKind, tag: impl Into<String>) -> Self {
        RecordedEvent {
            action,
            timestamp: 0,
            tag: tag.into(),
            value: None,
            primary_selector: None,
            selector_candidates: Vec::new(),
            iframe_context: None,
        }
    }

    /// Selector code generation should target: the applied primary selector,
    /// else the first candidate, else the raw tag name.
    pub fn effective_selector(&self) -> &str {
        self.primary_selector
            .as_deref()
            .or_else(|| {
                self.selector_candidates
                    .first()
                    .map(|candidate| candidate.selector.as_str())
            })
            .unwrap_or(&self.tag)
    }

    /// Apply a chosen candidate back onto the event. This is the only place
    /// the pipeline mutates a stored event.
    pub fn apply_candidate(&mut self, candidate: &SelectorCandidate) {
        self.primary_selector = Some(candidate.selector.clone());
    }
}
