//! Structured session logging
//!
//! Every session appends self-contained JSON records to a timestamped
//! `.jsonl` file and mirrors them to `latest.jsonl`, which is truncated at
//! session start. The logger is an explicitly constructed handle injected
//! into the agent and the REPL: opened at session start, flushed on every
//! write, closed when dropped at session end.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::{Result, TinkerError};

/// A structured session event
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    SessionStart,
    UserInput {
        message: String,
    },
    ToolUsage {
        tool: String,
        input: serde_json::Value,
        result: String,
    },
    ToolError {
        tool: String,
        input: serde_json::Value,
        error: String,
    },
    AgentResponse {
        message: String,
    },
    SessionEnd {
        reason: String,
    },
    Error {
        message: String,
    },
}

/// One log line: a timestamp plus the flattened event payload
#[derive(Serialize)]
struct LogRecord<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a LogEvent,
}

/// Append-only session log sink
pub struct SessionLogger {
    session_path: PathBuf,
    files: Mutex<LogFiles>,
}

struct LogFiles {
    session: File,
    latest: File,
}

impl SessionLogger {
    /// Open the log sink in the given directory
    ///
    /// Creates the directory if needed, opens a fresh timestamped session
    /// file, and truncates `latest.jsonl`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| TinkerError::log(format!("Failed to create log directory: {}", e)))?;

        let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3fZ").to_string();
        let session_path = dir.join(format!("{}.jsonl", stamp));
        let latest_path = dir.join("latest.jsonl");

        let session = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&session_path)
            .map_err(|e| TinkerError::log(format!("Failed to open session log: {}", e)))?;

        let latest = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&latest_path)
            .map_err(|e| TinkerError::log(format!("Failed to open latest log: {}", e)))?;

        Ok(Self {
            session_path,
            files: Mutex::new(LogFiles { session, latest }),
        })
    }

    /// Path of this session's log file
    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    /// Append one event as a single atomic line to both sinks
    ///
    /// A write failure is reported to stderr and never terminates the
    /// session.
    pub fn log(&self, event: &LogEvent) {
        let record = LogRecord {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
        };

        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to serialize log record: {}", e);
                return;
            }
        };

        // The mutex keeps concurrent tool tasks from interleaving lines.
        let mut files = match self.files.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = write_line(&mut files.session, &line) {
            eprintln!("Failed to write session log: {}", e);
        }
        if let Err(e) = write_line(&mut files.latest, &line) {
            eprintln!("Failed to write latest log: {}", e);
        }
    }
}

fn write_line(file: &mut File, line: &str) -> std::io::Result<()> {
    writeln!(file, "{}", line)?;
    file.flush()
}
