// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Server configuration
//!
//! Values come from built-in defaults, then the environment, then CLI flags.

use std::path::PathBuf;

use crate::error::{Result, ToolboxError};

/// Human-readable server name reported during `initialize`
pub const SERVER_NAME: &str = "Example MCP Server";

/// Version reported by `initialize` and `health_check`
pub const SERVER_VERSION: &str = "1.0.0";

/// Environment variable holding the advertised port
pub const PORT_ENV: &str = "MCP_SERVER_PORT";

/// Port used when `MCP_SERVER_PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;

/// Log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = ".claude/logs/mcp-server.log";

/// Process-wide server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Advertised port. The stdio transport does not listen on it.
    pub port: u16,
    /// File that log lines are appended to
    pub log_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PORT_ENV) {
            config.port = raw.trim().parse().map_err(|_| {
                ToolboxError::Config(format!("{} must be a port number, got '{}'", PORT_ENV, raw))
            })?;
        }

        Ok(config)
    }

    /// Override the log file location
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }
}
