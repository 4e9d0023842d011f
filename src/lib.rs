//! Tinker - a minimal interactive coding agent
//!
//! Relays terminal input to the Anthropic Messages API, executes the model's
//! tool calls against the local filesystem, and loops until the model
//! produces a final text answer.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Model provider abstraction with the Anthropic client
//! - **Tools**: Tool registry with the filesystem tools
//! - **Agent**: The conversation loop and transcript management
//! - **Logging**: Structured per-session JSON log records
//! - **CLI**: Command-line interface and REPL

pub mod agent;
pub mod cli;
pub mod core;
pub mod llm;
pub mod logging;
pub mod tools;

// Re-export commonly used items
pub use agent::Agent;
pub use cli::Repl;
pub use core::{Config, Result, TinkerError};
pub use logging::{LogEvent, SessionLogger};
