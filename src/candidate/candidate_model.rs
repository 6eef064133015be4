use serde::{Deserialize, Serialize};

// ============================================================================
// Selector candidates and their live-page evaluation results
// ============================================================================

/// Kind of selector expression a candidate carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorType {
    Css,
    Xpath,
    Text,
}

impl SelectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorType::Css => "css",
            SelectorType::Xpath => "xpath",
            SelectorType::Text => "text",
        }
    }

    /// Parse a type tag from an external payload. Unknown tags are dropped.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "css" => Some(SelectorType::Css),
            "xpath" => Some(SelectorType::Xpath),
            "text" => Some(SelectorType::Text),
            _ => None,
        }
    }
}

/// How a text selector matches its target. Only meaningful for text selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Exact,
    Contains,
}

impl MatchMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "exact" => Some(MatchMode::Exact),
            "contains" => Some(MatchMode::Contains),
            _ => None,
        }
    }
}

/// Provenance tag for candidates produced by this pipeline.
pub const SOURCE_AI: &str = "ai";

/// A single proposed element locator with scoring metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorCandidate {
    pub selector: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_type: Option<SelectorType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<MatchMode>,

    /// Raw matched text for text selectors, stripped of the `text=` wrapper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Confidence, integer 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_count: Option<u64>,

    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    SOURCE_AI.to_string()
}

impl SelectorCandidate {
    pub fn new(selector: impl Into<String>) -> Self {
        SelectorCandidate {
            selector: selector.into(),
            selector_type: None,
            match_mode: None,
            text_value: None,
            reason: None,
            score: None,
            unique: None,
            match_count: None,
            source: SOURCE_AI.to_string(),
        }
    }

    /// De-duplication and evaluation-matching key.
    pub fn identity_key(&self) -> String {
        identity_key(&self.selector, self.selector_type)
    }
}

/// `selector::type` with an empty type segment when the type is unknown.
pub fn identity_key(selector: &str, selector_type: Option<SelectorType>) -> String {
    format!(
        "{}::{}",
        selector,
        selector_type.map(|t| t.as_str()).unwrap_or("")
    )
}

/// Per-candidate outcome reported by the page-evaluation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub selector: String,

    #[serde(default)]
    pub selector_type: Option<SelectorType>,

    /// Count of live DOM matches, when the probe succeeded.
    #[serde(default)]
    pub match_count: Option<u64>,

    /// Explicit uniqueness assertion, for collaborators that cannot count.
    #[serde(default)]
    pub unique: Option<bool>,

    #[serde(default)]
    pub error: Option<String>,
}

impl EvaluationResult {
    pub fn identity_key(&self) -> String {
        identity_key(&self.selector, self.selector_type)
    }
}

/// Outbound triple handed to the page-evaluation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationProbe {
    pub selector: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_type: Option<SelectorType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<MatchMode>,
}
