// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool system
//!
//! Tools are synchronous, stateless handlers looked up by name. A handler
//! never fails past its own boundary: operational errors come back as a
//! [`ToolResult`] whose output is [`ToolOutput::Error`]. The only `Err` a
//! [`Tool::call`] returns is for arguments that cannot be decoded at all.

pub mod builtin;
pub mod definition;

pub use definition::*;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, ToolboxError};

/// Structured outcome of a single tool call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// Name of the tool that produced this result
    pub tool: String,
    /// The success or error payload
    pub output: ToolOutput,
}

/// Output from a tool
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Tool-specific success fields
    Success(Map<String, Value>),
    /// Error message plus the neutral fields the tool reports on failure
    Error {
        message: String,
        fields: Map<String, Value>,
    },
}

impl ToolResult {
    /// Create a successful result from any serializable record
    pub fn success<T: Serialize>(tool: impl Into<String>, payload: &T) -> Self {
        let tool = tool.into();
        match serde_json::to_value(payload) {
            Ok(Value::Object(fields)) => Self {
                tool,
                output: ToolOutput::Success(fields),
            },
            Ok(other) => {
                let mut fields = Map::new();
                fields.insert("result".to_string(), other);
                Self {
                    tool,
                    output: ToolOutput::Success(fields),
                }
            }
            Err(e) => Self::error(tool, e.to_string()),
        }
    }

    /// Create an error result
    pub fn error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            output: ToolOutput::Error {
                message: message.into(),
                fields: Map::new(),
            },
        }
    }

    /// Add an extra field to either payload
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        match &mut self.output {
            ToolOutput::Success(fields) => fields.insert(key.to_string(), value.into()),
            ToolOutput::Error { fields, .. } => fields.insert(key.to_string(), value.into()),
        };
        self
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self.output, ToolOutput::Error { .. })
    }

    /// The error message, if this is an error
    pub fn error_message(&self) -> Option<&str> {
        match &self.output {
            ToolOutput::Error { message, .. } => Some(message),
            ToolOutput::Success(_) => None,
        }
    }

    /// Look up a payload field
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.output {
            ToolOutput::Success(fields) => fields.get(key),
            ToolOutput::Error { fields, .. } => fields.get(key),
        }
    }

    /// Flatten into a single JSON object
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("tool", &self.tool)?;
        match &self.output {
            ToolOutput::Success(fields) => {
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
            }
            ToolOutput::Error { message, fields } => {
                map.serialize_entry("error", message)?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
            }
        }
        map.end()
    }
}

/// Decode tool arguments, treating a missing argument object as empty
pub fn parse_arguments<T: DeserializeOwned>(input: Value) -> Result<T> {
    let input = if input.is_null() {
        Value::Object(Map::new())
    } else {
        input
    };
    serde_json::from_value(input).map_err(|e| ToolboxError::InvalidInput(e.to_string()))
}

/// Trait for implementing tools
pub trait Tool: Send + Sync {
    /// Get the tool name
    fn name(&self) -> &str;

    /// Get the tool definition advertised to clients
    fn definition(&self) -> ToolDefinition;

    /// Run the tool. Returns `Err` only for undecodable arguments.
    fn call(&self, input: Value) -> Result<ToolResult>;
}

/// Immutable registry of available tools, in registration order
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a registry with all built-in tools
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(builtin::FileSearchTool));
        registry.register(Arc::new(builtin::FileReadTool));
        registry.register(Arc::new(builtin::JsonParseTool));
        registry.register(Arc::new(builtin::HealthCheckTool));

        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Get all tool definitions
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| t.definition())
            .collect()
    }

    /// List all tool names
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
