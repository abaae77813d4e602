#![forbid(unsafe_code)]

//! Shared JSONL logging helpers for tests.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

/// Schema version for test JSONL logs.
pub const TEST_JSONL_SCHEMA: &str = "waypoint-test-jsonl-v1";

/// Returns true if JSONL logging should be emitted.
#[must_use]
pub fn jsonl_enabled() -> bool {
    std::env::var("WAYPOINT_JSONL").is_ok() || std::env::var("CI").is_ok()
}

/// JSONL logger with stable run context + per-entry sequence numbering.
pub struct JsonlLogger {
    run_id: String,
    context: Vec<(String, String)>,
    seq: AtomicU64,
}

impl JsonlLogger {
    /// Create a new JSONL logger with a run identifier.
    #[must_use]
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            context: Vec::new(),
            seq: AtomicU64::new(0),
        }
    }

    /// Add a context field to all log entries.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Build one log line without emitting it.
    #[must_use]
    pub fn line(&self, event: &str, fields: &[(&str, &str)]) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let mut obj = Map::new();
        obj.insert("schema_version".into(), Value::from(TEST_JSONL_SCHEMA));
        obj.insert("run_id".into(), Value::from(self.run_id.as_str()));
        obj.insert("seq".into(), Value::from(seq));
        obj.insert("event".into(), Value::from(event));
        for (key, value) in &self.context {
            obj.insert(key.clone(), Value::from(value.as_str()));
        }
        for (key, value) in fields {
            obj.insert((*key).to_string(), Value::from(*value));
        }
        Value::Object(obj).to_string()
    }

    /// Emit a JSONL line to stderr if logging is enabled.
    pub fn log(&self, event: &str, fields: &[(&str, &str)]) {
        if !jsonl_enabled() {
            return;
        }
        eprintln!("{}", self.line(event, fields));
    }
}
