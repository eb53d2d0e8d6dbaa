// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! mcp-toolbox - a Model Context Protocol server for local files and JSON.
//!
//! This crate exposes the shared runtime used by the `mcp-toolbox` CLI
//! (`src/main.rs`).
//!
//! Architecture highlights:
//! - `tools`: the four built-in handlers and the immutable tool registry
//! - `resources`, `prompts`: the `file://{path}` resource and review template
//! - `mcp`: JSON-RPC 2.0 protocol types, stdio transport and dispatcher
//! - `config`, `logging`: environment configuration and the log sink
//! - `cli`, `commands`: the command-line front end

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod prompts;
pub mod resources;
pub mod tools;

pub use error::{Result, ToolboxError};
