// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! One-shot tool invocation

use serde_json::Value;

use crate::cli::args::{CallArgs, OutputFormat};
use crate::error::{Result, ToolboxError};
use crate::tools::{ToolRegistry, ToolResult};

/// Execute the call command
pub fn execute(args: &CallArgs, format: OutputFormat) -> Result<()> {
    let registry = ToolRegistry::with_builtins();
    let result = invoke(&registry, &args.name, args.args.as_deref())?;

    let output = match format {
        OutputFormat::Text => serde_json::to_string_pretty(&result)?,
        OutputFormat::Json => serde_json::to_string(&result)?,
    };
    println!("{}", output);

    Ok(())
}

/// Invoke `name` with optional JSON-encoded arguments
pub fn invoke(registry: &ToolRegistry, name: &str, args: Option<&str>) -> Result<ToolResult> {
    let tool = registry
        .get(name)
        .ok_or_else(|| ToolboxError::ToolNotFound(name.to_string()))?;

    let input = match args {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)?,
        _ => Value::Null,
    };

    tracing::debug!("Invoking {} with {}", name, input);
    tool.call(input)
}
