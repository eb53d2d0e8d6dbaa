// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool listing command

use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::tools::ToolRegistry;

/// Execute the tools command
pub fn execute(format: OutputFormat) -> Result<()> {
    let registry = ToolRegistry::with_builtins();
    println!("{}", render(&registry, format)?);
    Ok(())
}

/// Render the registered tools in the requested format
pub fn render(registry: &ToolRegistry, format: OutputFormat) -> Result<String> {
    let definitions = registry.definitions();

    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&definitions)?);
    }

    let width = definitions.iter().map(|d| d.name.len()).max().unwrap_or(0);
    let lines: Vec<String> = definitions
        .iter()
        .map(|d| format!("{:width$}  {}", d.name, d.description, width = width))
        .collect();

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_one_line_per_tool() {
        let registry = ToolRegistry::with_builtins();
        let text = render(&registry, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("file_search"));
        assert!(lines[3].starts_with("health_check"));
    }

    #[test]
    fn test_render_json_is_definition_array() {
        let registry = ToolRegistry::with_builtins();
        let json = render(&registry, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let tools = parsed.as_array().unwrap();
        assert_eq!(tools.len(), 4);
        assert_eq!(tools[2]["name"], "json_parse");
        assert!(tools[2]["inputSchema"]["properties"]["operation"].is_object());
    }

    #[test]
    fn test_render_empty_registry() {
        let registry = ToolRegistry::new();
        assert_eq!(render(&registry, OutputFormat::Text).unwrap(), "");
        assert_eq!(render(&registry, OutputFormat::Json).unwrap(), "[]");
    }
}
