//! Name-keyed lookup table of registered tools.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::CourierError;
use crate::service::wire::ToolDeclaration;

use super::tool::Tool;
use super::validation::validate_arguments;

/// Registry mapping tool names to their implementations.
///
/// Every tool call the agent requests must resolve here; an unregistered
/// name is fatal for the run rather than silently skipped.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name. Re-registering a name replaces
    /// the previous handler.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        debug!(tool = tool.name(), "register tool");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate the payload against the tool's schema, then invoke it.
    pub async fn invoke(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<String, CourierError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| CourierError::UnknownTool {
                name: name.to_string(),
            })?;

        validate_arguments(args, &tool.parameters().schema)
            .map_err(CourierError::InvalidArguments)?;

        tool.invoke(args).await
    }

    /// Wire-shape declarations for every registered tool, for assistant
    /// creation. Sorted by name so the request body is deterministic.
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        let mut names: Vec<_> = self.tools.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| {
                let tool = &self.tools[name];
                ToolDeclaration::function(
                    tool.name().to_string(),
                    tool.description().to_string(),
                    tool.parameters().schema.clone(),
                )
            })
            .collect()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}
