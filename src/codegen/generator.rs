use crate::event::event_model::RecordedEvent;

use super::{playwright, selenium};

// ============================================================================
// Code generation dispatch
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    Playwright,
    Selenium,
}

impl Framework {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "playwright" => Some(Framework::Playwright),
            "selenium" => Some(Framework::Selenium),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Javascript,
    Typescript,
}

impl Language {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "python" | "py" => Some(Language::Python),
            "javascript" | "js" => Some(Language::Javascript),
            "typescript" | "ts" => Some(Language::Typescript),
            _ => None,
        }
    }
}

/// Render an ordered event list into test source for a framework/language
/// pair. Deterministic: identical inputs always yield byte-identical output.
/// Unknown framework or language names yield an empty string rather than an
/// error.
pub fn generate(events: &[RecordedEvent], framework: &str, language: &str) -> String {
    let (Some(framework), Some(language)) = (Framework::parse(framework), Language::parse(language))
    else {
        return String::new();
    };

    match framework {
        Framework::Playwright => playwright::render(events, language),
        Framework::Selenium => selenium::render(events, language),
    }
}

/// Escape a string for embedding in a double-quoted literal. The escapes
/// used here are valid in Python, JavaScript and TypeScript alike.
pub(crate) fn escape_literal(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
