// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! mcp-toolbox - MCP server exposing file and JSON tools
//!
//! Entry point for the mcp-toolbox CLI application.

use clap::Parser;

use mcp_toolbox::cli::{Cli, Commands};
use mcp_toolbox::commands;
use mcp_toolbox::config::ServerConfig;
use mcp_toolbox::error::Result;
use mcp_toolbox::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration, CLI overrides environment
    let mut config = ServerConfig::from_env()?;
    if let Some(path) = cli.log_file.clone() {
        config = config.with_log_file(path);
    }

    logging::init(&config.log_file, cli.verbose)?;

    match cli.command {
        None | Some(Commands::Serve) => {
            commands::serve::execute(&config).await?;
        }
        Some(Commands::Tools) => {
            commands::tools::execute(cli.format)?;
        }
        Some(Commands::Call(ref args)) => {
            commands::call::execute(args, cli.format)?;
        }
    }

    Ok(())
}
