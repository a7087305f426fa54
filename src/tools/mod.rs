//! Tool system for the Giphy MCP server
//!
//! A tool describes itself with a JSON schema and executes with parameters
//! that have already been validated against that schema. [`ToolSystem`] owns
//! the registry, performs the validation, and renders results as the
//! pretty-printed JSON text handed back to the client.

use crate::error::GatewayError;
use crate::normalize::NormalizedMedia;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn, Instrument};

pub mod giphy;
pub mod params;

pub use giphy::{GiphyTool, ResultShape, ToolSpec, TOOL_SPECS};

/// Tool interface
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name, description and JSON schema of accepted parameters
    fn describe(&self) -> ToolDescription;

    /// Execute with parameters that passed schema validation
    async fn execute(&self, parameters: &Value) -> Result<ToolOutput, ToolError>;
}

/// Tool description
#[derive(Debug, Clone)]
pub struct ToolDescription {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Result of a tool execution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Single(NormalizedMedia),
    List(Vec<NormalizedMedia>),
}

impl ToolOutput {
    /// Pretty-printed JSON with 2-space indentation
    pub fn to_text(&self) -> Result<String, ToolError> {
        serde_json::to_string_pretty(self).map_err(|e| ToolError::SerializationError(e.to_string()))
    }
}

/// Registry of tools, kept in registration order
pub struct ToolSystem {
    tools: HashMap<String, Box<dyn Tool>>,
    order: Vec<String>,
}

impl ToolSystem {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registry holding the five Giphy tools over one shared gateway
    pub fn giphy(gateway: Arc<crate::gateway::RequestGateway>) -> Self {
        let mut system = Self::new();
        for spec in TOOL_SPECS.iter() {
            let registered = system.register(Box::new(GiphyTool::new(spec, gateway.clone())));
            debug_assert!(registered.is_ok(), "TOOL_SPECS names are unique");
        }
        system
    }

    /// Register a tool under the name from its description
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.describe().name;
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get tool description
    pub fn describe_tool(&self, tool_name: &str) -> Option<ToolDescription> {
        self.tools.get(tool_name).map(|tool| tool.describe())
    }

    /// Descriptions of all tools in registration order
    pub fn describe_all(&self) -> Vec<ToolDescription> {
        self.order
            .iter()
            .filter_map(|name| self.describe_tool(name))
            .collect()
    }

    /// Get list of available tools
    pub fn list_tools(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Execute tool with validated parameters
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: &Value,
    ) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        // Invalid input never reaches the tool body
        self.validate_parameters(tool_name, parameters)?;

        tool.execute(parameters).await
    }

    /// Execute a tool and render its result as the client-facing text payload
    pub async fn call_tool(&self, tool_name: &str, parameters: &Value) -> Result<String, ToolError> {
        let span = crate::tool_span!(tool = %tool_name);
        async move {
            let started = Instant::now();
            let result = self
                .execute_tool(tool_name, parameters)
                .await
                .and_then(|output| output.to_text());

            let duration_ms = started.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => info!(duration_ms, "Tool invocation succeeded"),
                Err(e) => warn!(duration_ms, error = %e, "Tool invocation failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Validate parameters against the tool's declared schema
    fn validate_parameters(&self, tool_name: &str, parameters: &Value) -> Result<(), ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        let description = tool.describe();
        let validator = jsonschema::validator_for(&description.parameters)
            .map_err(|e| ToolError::SchemaError(format!("Schema compilation error: {e}")))?;

        validator.validate(parameters).map_err(|errors| {
            let error_messages: Vec<String> = errors
                .map(|e| format!("At '{}': {}", e.instance_path, e))
                .collect();
            ToolError::ValidationError(error_messages.join("; "))
        })
    }
}

impl Default for ToolSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Tool system errors
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),
    #[error("Parameter validation failed: {0}")]
    ValidationError(String),
    #[error("Schema error: {0}")]
    SchemaError(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Failed to serialize result: {0}")]
    SerializationError(String),
}

impl ToolError {
    /// True when the caller sent something the tool cannot accept
    pub fn is_invalid_params(&self) -> bool {
        matches!(self, ToolError::UnknownTool(_) | ToolError::ValidationError(_))
    }
}
