// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mcp-toolbox - MCP server exposing file and JSON tools
#[derive(Parser, Debug)]
#[command(name = "mcp-toolbox")]
#[command(version, about = "MCP server exposing file and JSON tools over stdio")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log file path (defaults to .claude/logs/mcp-server.log)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the MCP server on stdio (default when no command given)
    Serve,

    /// List registered tools
    Tools,

    /// Invoke a single tool and print its result
    Call(CallArgs),
}

/// Arguments for the call subcommand
#[derive(clap::Args, Debug, PartialEq)]
pub struct CallArgs {
    /// Tool name
    pub name: String,

    /// Tool arguments as a JSON object
    pub args: Option<String>,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}
