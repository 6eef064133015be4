use std::{fs::OpenOptions, io::Write, sync::Mutex};

use crate::trace::trace::TraceEvent;

/// Append-only JSONL trace sink. Every failure path degrades to a stderr
/// warning; tracing must never take the pipeline down with it.
pub struct TraceLogger {
    file: Option<Mutex<std::fs::File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => TraceLogger {
                file: Some(Mutex::new(file)),
            },
            Err(error) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, error);
                TraceLogger { file: None }
            }
        }
    }

    /// A logger that drops everything. For tests and --no-trace runs.
    pub fn disabled() -> Self {
        TraceLogger { file: None }
    }

    pub fn record(&self, event: &TraceEvent) {
        let Some(file_mutex) = &self.file else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(error) => {
                eprintln!("Warning: failed to serialize trace event: {}", error);
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(file) => file,
            Err(error) => {
                eprintln!("Warning: trace logger lock poisoned: {}", error);
                return;
            }
        };

        if let Err(error) = writeln!(file, "{}", line) {
            eprintln!("Warning: failed to write trace event: {}", error);
        }
    }
}
