// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Health check tool

use serde::Serialize;
use serde_json::Value;

use super::TOOL_NAMES;
use crate::config::SERVER_VERSION;
use crate::error::Result;
use crate::tools::{SchemaBuilder, Tool, ToolDefinition, ToolResult};

pub const NAME: &str = "health_check";

/// Constant status record
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// Local time, ISO-8601
    pub timestamp: String,
    pub version: &'static str,
    pub tools: Vec<&'static str>,
}

/// Report server health. Cannot fail.
pub fn health_check() -> ToolResult {
    let status = HealthStatus {
        status: "healthy",
        timestamp: chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        version: SERVER_VERSION,
        tools: TOOL_NAMES.to_vec(),
    };
    ToolResult::success(NAME, &status)
}

/// Tool reporting server status
pub struct HealthCheckTool;

impl Tool for HealthCheckTool {
    fn name(&self) -> &str {
        NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME.to_string(),
            description: "Check server health. Returns status, timestamp, version and available tools."
                .to_string(),
            input_schema: SchemaBuilder::new().build(),
        }
    }

    fn call(&self, _input: Value) -> Result<ToolResult> {
        Ok(health_check())
    }
}
