//! Tool system for answering agent function calls locally.

pub mod registry;
pub mod tool;
pub mod types;
pub mod validation;

pub use registry::ToolRegistry;
pub use tool::{AgentTool, Tool};
pub use types::AgentToolParameters;
