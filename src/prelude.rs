//! Convenience re-exports for common use.

pub use crate::config::CourierConfig;
pub use crate::error::{CourierError, Result};
pub use crate::news::{news_tool, NewsClient};
pub use crate::run::{PollerConfig, RunPoller, ToolCallDispatcher};
pub use crate::service::wire::{Run, RunStatus, ToolCallRequest, ToolOutput};
pub use crate::service::{AgentService, HttpAgentService};
pub use crate::session::{AssistantProfile, FileIdentityStore, IdentityStore, Session};
pub use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolRegistry};
