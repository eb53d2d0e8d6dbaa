// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool definition types
//!
//! These types describe tools to MCP clients via `tools/list`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition as advertised to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Tool description
    pub description: String,

    /// Input schema (JSON Schema)
    #[serde(rename = "inputSchema")]
    pub input_schema: ToolInputSchema,
}

/// Input schema for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    /// Schema type (always "object")
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Property definitions
    pub properties: Value,

    /// Required properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// Helper to create a tool input schema
pub struct SchemaBuilder {
    properties: serde_json::Map<String, Value>,
    required: Vec<String>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            properties: serde_json::Map::new(),
            required: vec![],
        }
    }

    fn property(mut self, name: &str, property: Value, required: bool) -> Self {
        self.properties.insert(name.to_string(), property);
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add a string property
    pub fn string(self, name: &str, description: &str, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "string",
                "description": description
            }),
            required,
        )
    }

    /// Add a boolean property
    pub fn boolean(self, name: &str, description: &str, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "boolean",
                "description": description
            }),
            required,
        )
    }

    /// Add a string property restricted to a fixed set of values
    pub fn enumeration(self, name: &str, description: &str, values: &[&str], required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "string",
                "description": description,
                "enum": values
            }),
            required,
        )
    }

    /// Attach a default value to an already added property
    pub fn default_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Some(Value::Object(prop)) = self.properties.get_mut(name) {
            prop.insert("default".to_string(), value.into());
        }
        self
    }

    /// Build the schema
    pub fn build(self) -> ToolInputSchema {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties: Value::Object(self.properties),
            required: self.required,
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
