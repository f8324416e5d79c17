//! Resolve a paused run's tool-call batch into outputs.

use std::sync::Arc;

use tracing::debug;

use crate::error::{CourierError, Result};
use crate::service::wire::{ToolCallRequest, ToolOutput};
use crate::tools::ToolRegistry;

/// Turns a batch of pending tool calls into a batch of outputs.
///
/// The resume protocol requires an answer for every pending request, so a
/// failure on any single call fails the batch as a whole; nothing is
/// silently dropped.
pub struct ToolCallDispatcher {
    registry: Arc<ToolRegistry>,
}

impl ToolCallDispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatch every request in the batch, producing one output per
    /// request under the same identity.
    pub async fn dispatch(&self, batch: &[ToolCallRequest]) -> Result<Vec<ToolOutput>> {
        let mut outputs = Vec::with_capacity(batch.len());

        for request in batch {
            let name = request.function.name.as_str();
            debug!(call_id = %request.id, tool = name, "dispatch tool call");

            let args: serde_json::Value = serde_json::from_str(&request.function.arguments)
                .map_err(|err| {
                    CourierError::InvalidArguments(format!(
                        "tool '{name}' arguments are not valid JSON: {err}"
                    ))
                })?;

            let output = self.registry.invoke(name, &args).await?;
            outputs.push(ToolOutput {
                tool_call_id: request.id.clone(),
                output,
            });
        }

        Ok(outputs)
    }
}
