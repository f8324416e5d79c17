//! Remote agent service: the RPC seam and its REST implementation.

pub mod assistants;
pub mod http;
pub mod wire;

pub use assistants::HttpAgentService;

use async_trait::async_trait;

use crate::error::Result;
use wire::{
    Assistant, CreateAssistant, MessageRole, Run, Thread, ThreadMessage, ToolOutput,
};

/// The operations the orchestration core needs from the remote agent service.
///
/// `HttpAgentService` is the production implementation; tests drive the
/// orchestration through scripted implementations of this trait.
#[async_trait]
pub trait AgentService: Send + Sync {
    async fn create_assistant(&self, request: &CreateAssistant) -> Result<Assistant>;

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant>;

    async fn create_thread(&self) -> Result<Thread>;

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread>;

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage>;

    /// List the thread's messages, newest first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>>;

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run>;
}
