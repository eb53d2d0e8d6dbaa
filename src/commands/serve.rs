// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP server command

use std::sync::Arc;

use crate::config::{ServerConfig, SERVER_NAME, SERVER_VERSION};
use crate::error::Result;
use crate::mcp::{McpServer, PROTOCOL_VERSION};
use crate::tools::ToolRegistry;

/// Execute the serve command
pub async fn execute(config: &ServerConfig) -> Result<()> {
    let server = build_server();

    tracing::info!("Starting {} v{}", SERVER_NAME, SERVER_VERSION);
    tracing::info!("Protocol version: {}", PROTOCOL_VERSION);
    tracing::info!("Port: {}", config.port);
    tracing::info!("Log file: {}", config.log_file.display());
    tracing::info!("Tools: {}", server.registry().names().join(", "));
    tracing::info!("Server ready - listening on stdio");

    server.run().await
}

/// Build a server over the built-in tools
pub fn build_server() -> McpServer {
    McpServer::new(Arc::new(ToolRegistry::with_builtins()))
}
