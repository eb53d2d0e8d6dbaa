// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! File search tool
//!
//! Finds files matching a glob pattern under a directory.

use glob::{glob_with, MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{Result, ToolboxError};
use crate::tools::{parse_arguments, SchemaBuilder, Tool, ToolDefinition, ToolResult};

pub const NAME: &str = "file_search";

/// Arguments for `file_search`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchQuery {
    /// Glob pattern, e.g. `*.rs` or `test_*.py`
    pub pattern: String,
    /// Directory to search under
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Descend into nested directories
    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_recursive() -> bool {
    true
}

impl SearchQuery {
    /// Query with the default directory and recursion
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            directory: default_directory(),
            recursive: default_recursive(),
        }
    }

    pub fn in_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Full glob expression with the directory part escaped
    pub fn glob_expression(&self) -> String {
        let directory = Pattern::escape(self.directory.trim_end_matches(['/', '\\']));
        if self.recursive {
            format!("{}/**/{}", directory, self.pattern)
        } else {
            format!("{}/{}", directory, self.pattern)
        }
    }
}

/// Successful search payload
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub pattern: String,
    pub directory: String,
    pub results: Vec<String>,
    pub count: usize,
}

/// Run a search. Failures are reported with empty results and a zero count.
pub fn search(query: &SearchQuery) -> ToolResult {
    tracing::info!(
        "file_search: pattern={}, directory={}, recursive={}",
        query.pattern,
        query.directory,
        query.recursive
    );

    match try_search(query) {
        Ok(report) => ToolResult::success(NAME, &report),
        Err(e) => {
            tracing::error!("file_search failed: {}", e);
            ToolResult::error(NAME, e.to_string())
                .with_field("results", Vec::<Value>::new())
                .with_field("count", 0)
        }
    }
}

fn try_search(query: &SearchQuery) -> Result<SearchReport> {
    if !Path::new(&query.directory).is_dir() {
        return Err(ToolboxError::DirectoryNotFound(query.directory.clone().into()));
    }

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut results = Vec::new();
    for entry in glob_with(&query.glob_expression(), options)? {
        match entry {
            Ok(path) => results.push(path.to_string_lossy().into_owned()),
            Err(e) => tracing::debug!("file_search: skipping unreadable entry: {}", e),
        }
    }
    results.sort();

    Ok(SearchReport {
        pattern: query.pattern.clone(),
        directory: query.directory.clone(),
        count: results.len(),
        results,
    })
}

/// Tool for finding files by glob pattern
pub struct FileSearchTool;

impl Tool for FileSearchTool {
    fn name(&self) -> &str {
        NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME.to_string(),
            description: "Search for files matching a glob pattern (e.g. '*.py', 'test_*.js'). Returns the matching paths and their count.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("pattern", "File pattern to match (e.g. '*.py', 'test_*.js')", true)
                .string("directory", "Directory to search in (default: current directory)", false)
                .default_value("directory", ".")
                .boolean("recursive", "Include subdirectories (default: true)", false)
                .default_value("recursive", true)
                .build(),
        }
    }

    fn call(&self, input: Value) -> Result<ToolResult> {
        let query: SearchQuery = parse_arguments(input)?;
        Ok(search(&query))
    }
}
