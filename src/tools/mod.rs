//! Tools module - tool implementations for the agent
//!
//! Contains the filesystem tools and the tool registry.

pub mod fs;
pub mod registry;

pub use registry::ToolRegistry;
