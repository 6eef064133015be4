use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;
use sha1::{Digest, Sha1};

use crate::ai::client::AiSettings;
use crate::event::event_model::RecordedEvent;

// ============================================================================
// Outbound request assembly
// ============================================================================

/// Static selector-quality guidance attached to every suggestion request.
pub const SELECTOR_GUIDANCE: [&str; 5] = [
    "Prefer short, human-readable CSS selectors over positional ones",
    "Prefer stable attributes (id, name, data-testid) over generated class names",
    "Avoid nth-child and positional indexes unless nothing else disambiguates",
    "Use text selectors only for short, stable visible labels",
    "Return one selector per suggestion with a brief reason",
];

/// Instruction appended to code-review requests. The response must be bare
/// JSON so the normalizer can recover it without stripping markdown.
pub const REVIEW_INSTRUCTION: &str = "Review the test code and respond with a single JSON \
object containing the keys updatedCode, summary and suggestions. Do not wrap the JSON in \
markdown code fences.";

/// Caller-supplied context for one suggestion round-trip.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<i64>,

    pub test_name: String,
    pub page_url: String,
    pub framework: String,
    pub language: String,

    /// Per-call model override; wins over the stored settings default.
    #[serde(skip)]
    pub model_override: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestMetadata {
    pub tool: &'static str,
    pub version: &'static str,
    pub issued_at_ms: u128,
}

impl RequestMetadata {
    pub fn now() -> Self {
        RequestMetadata {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            issued_at_ms: epoch_millis(),
        }
    }
}

/// Selector-suggestion request envelope. Transient, never persisted.
#[derive(Debug, Serialize)]
pub struct AiRequest {
    pub request_id: String,
    pub model: String,
    pub event: Value,
    pub context: RequestContext,
    pub guidance: Vec<&'static str>,
    pub metadata: RequestMetadata,
}

/// Code-review request envelope.
#[derive(Debug, Serialize)]
pub struct ReviewRequest {
    pub request_id: String,
    pub model: String,
    pub code: String,
    pub test_name: String,
    pub instruction: &'static str,
    pub metadata: RequestMetadata,
}

pub fn build_selector_request(
    event: &RecordedEvent,
    context: &RequestContext,
    settings: &AiSettings,
) -> AiRequest {
    AiRequest {
        request_id: generate_request_id(),
        model: resolve_model(context.model_override.as_deref(), &settings.model),
        event: sanitize_payload(event),
        context: context.clone(),
        guidance: SELECTOR_GUIDANCE.to_vec(),
        metadata: RequestMetadata::now(),
    }
}

pub fn build_review_request(
    code: &str,
    test_name: &str,
    model_override: Option<&str>,
    settings: &AiSettings,
) -> ReviewRequest {
    ReviewRequest {
        request_id: generate_request_id(),
        model: resolve_model(model_override, &settings.model),
        code: code.to_string(),
        test_name: test_name.to_string(),
        instruction: REVIEW_INSTRUCTION,
        metadata: RequestMetadata::now(),
    }
}

/// Round-trip a payload through serde_json so the wire body is guaranteed
/// transport-safe. Serialization failure yields a null payload, never an
/// error: the triggering data is recorder state, and losing one payload is
/// preferable to failing the whole request.
pub fn sanitize_payload<T: Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

/// Model precedence: explicit per-call override → stored default → empty.
fn resolve_model(override_model: Option<&str>, default_model: &str) -> String {
    match override_model.map(str::trim) {
        Some(model) if !model.is_empty() => model.to_string(),
        _ => default_model.trim().to_string(),
    }
}

// ============================================================================
// Request-id generation
// ============================================================================

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Suffix length in base-36 digits.
const SUFFIX_DIGITS: u32 = 6;

/// Correlation token: base-36 millisecond timestamp plus a short fingerprint
/// suffix. Uniqueness is best-effort and the id is used for log correlation
/// only, never for security or deduplication.
pub fn generate_request_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha1::new();
    hasher.update(now.as_nanos().to_le_bytes());
    hasher.update(counter.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    let digest = hasher.finalize();

    let raw = u64::from_le_bytes(digest[..8].try_into().unwrap_or_default());
    let suffix = raw % 36_u64.pow(SUFFIX_DIGITS);

    format!("{}-{:0>6}", to_base36(now.as_millis()), to_base36(suffix as u128))
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut encoded = Vec::new();
    while value > 0 {
        encoded.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    encoded.reverse();
    String::from_utf8(encoded).unwrap_or_default()
}
