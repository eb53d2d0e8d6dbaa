// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for the toolbox
//!
//! Handlers never let these escape: at the tool boundary every error is
//! rendered into the `error` field of a [`crate::tools::ToolResult`].

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for toolbox operations
#[derive(Error, Debug)]
pub enum ToolboxError {
    /// IO error tied to a specific file
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Search root is missing or not a directory
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Unknown encoding name, or bytes that do not decode
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Unsupported `json_parse` operation
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// No tool registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logger installation errors
    #[error("Logging error: {0}")]
    Logging(String),
}

impl ToolboxError {
    /// Attach a path to an IO error
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolboxError::File {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for toolbox operations
pub type Result<T> = std::result::Result<T, ToolboxError>;
