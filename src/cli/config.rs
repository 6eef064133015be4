use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::ai::client::AiSettings;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "test-recorder",
    version,
    about = "Converts recorded browser interactions into automated test scripts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// AI suggestion/review endpoint
    #[arg(long, global = true)]
    pub ai_endpoint: Option<String>,

    /// AI model name
    #[arg(long, global = true)]
    pub ai_model: Option<String>,

    /// Path to config file (default: recorder.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a raw AI suggestion payload into a ranked candidate list
    Normalize {
        /// Path to the raw response (JSON or free text)
        #[arg(long)]
        response: String,

        /// Page-evaluation results to merge (JSON file)
        #[arg(long)]
        evaluations: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate test source from a recorded event file
    Generate {
        /// Path to the recorded events (JSON or YAML)
        #[arg(long)]
        events: String,

        /// Target framework: playwright or selenium
        #[arg(long)]
        framework: Option<String>,

        /// Target language: python, javascript or typescript
        #[arg(long)]
        language: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Request selector suggestions for a recorded event
    Suggest {
        /// Path to the recorded events (JSON or YAML)
        #[arg(long)]
        events: String,

        /// Index of the event to resolve (default: the last event)
        #[arg(long)]
        index: Option<usize>,

        /// Page-evaluation results to merge (JSON file)
        #[arg(long)]
        evaluations: Option<String>,

        /// Test case name sent with the request
        #[arg(long, default_value = "recorded test")]
        test_name: String,

        /// Page URL sent with the request
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Send generated test source out for AI code review
    Review {
        /// Path to the source file to review
        #[arg(long)]
        code: String,

        /// Test case name sent with the request
        #[arg(long, default_value = "recorded test")]
        test_name: String,

        /// Output file for the updated code (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `recorder.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub codegen: CodegenConfig,

    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AiConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    #[serde(default = "default_framework")]
    pub framework: String,

    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig {
            framework: "playwright".to_string(),
            language: "python".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default = "default_trace_file")]
    pub file: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            file: "recorder_trace.jsonl".to_string(),
        }
    }
}

// Serde default helpers
fn default_framework() -> String {
    "playwright".to_string()
}
fn default_language() -> String {
    "python".to_string()
}
fn default_trace_file() -> String {
    "recorder_trace.jsonl".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("recorder.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

/// Resolve AI settings: CLI flags > config file > empty defaults.
pub fn resolve_ai_settings(
    endpoint_flag: Option<&str>,
    model_flag: Option<&str>,
    config: &AppConfig,
) -> AiSettings {
    AiSettings {
        endpoint: endpoint_flag
            .or(config.ai.endpoint.as_deref())
            .unwrap_or("")
            .to_string(),
        api_key: config.ai.api_key.clone(),
        model: model_flag
            .or(config.ai.model.as_deref())
            .unwrap_or("")
            .to_string(),
    }
}
