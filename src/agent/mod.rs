//! Agent module - orchestration and transcript management
//!
//! Contains the conversation loop that coordinates model calls and tool
//! execution.

pub mod loop_state;
pub mod orchestrator;
pub mod transcript;

pub use loop_state::RoundState;
pub use orchestrator::Agent;
pub use transcript::Transcript;
