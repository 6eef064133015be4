use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    /// No AI endpoint configured (flag, config file and defaults all empty)
    MissingEndpoint,

    /// Network-level failure reaching the AI endpoint
    Network(reqwest::Error),

    /// The outbound request hit the fixed timeout and was abandoned
    Timeout { seconds: u64 },

    /// Non-2xx HTTP status, with a best-effort message from the body
    Http { status: u16, message: String },

    /// JSON serialization of an outbound body failed
    JsonSerialize { context: String, source: serde_json::Error },

    /// Reading a local input file failed
    Io { path: String, source: std::io::Error },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::MissingEndpoint => {
                write!(f, "No AI endpoint configured; set --ai-endpoint or the config file's ai.endpoint")
            }
            PipelineError::Network(source) => {
                write!(f, "Request failed: {}", source)
            }
            PipelineError::Timeout { seconds } => {
                write!(f, "Request timed out after {}s", seconds)
            }
            PipelineError::Http { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            PipelineError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            PipelineError::Io { path, source } => {
                write!(f, "Could not read '{}': {}", path, source)
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Network(source) => Some(source),
            PipelineError::JsonSerialize { source, .. } => Some(source),
            PipelineError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
