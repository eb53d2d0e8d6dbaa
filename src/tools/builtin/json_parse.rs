// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! JSON parse tool
//!
//! Parses, validates or prettifies JSON given inline or as a file path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, ToolboxError};
use crate::tools::{parse_arguments, SchemaBuilder, Tool, ToolDefinition, ToolResult};

pub const NAME: &str = "json_parse";

/// Message returned by a successful `validate`
pub const VALID_MESSAGE: &str = "Valid JSON";

/// What to do with the decoded document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonOp {
    Parse,
    Validate,
    Prettify,
}

impl JsonOp {
    pub const ALL: [&'static str; 3] = ["parse", "validate", "prettify"];

    pub fn as_str(self) -> &'static str {
        match self {
            JsonOp::Parse => "parse",
            JsonOp::Validate => "validate",
            JsonOp::Prettify => "prettify",
        }
    }
}

impl FromStr for JsonOp {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "parse" => Ok(JsonOp::Parse),
            "validate" => Ok(JsonOp::Validate),
            "prettify" => Ok(JsonOp::Prettify),
            other => Err(ToolboxError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for JsonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments for `json_parse`. The operation stays a raw string so an
/// unsupported value is reported as a tool error, not rejected as bad input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonOperation {
    /// JSON text, or a path to a JSON file
    pub input: String,
    #[serde(default = "default_operation")]
    pub operation: String,
}

fn default_operation() -> String {
    JsonOp::Parse.as_str().to_string()
}

impl JsonOperation {
    pub fn new(input: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            operation: operation.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonOutcome {
    Parsed {
        operation: &'static str,
        data: Value,
        valid: bool,
    },
    Validated {
        operation: &'static str,
        valid: bool,
        message: &'static str,
    },
    Prettified {
        operation: &'static str,
        result: String,
    },
}

/// Load the document: from the file if `input` names one, else inline
pub fn load_document(input: &str) -> Result<Value> {
    let path = Path::new(input);
    if path.is_file() {
        let text = std::fs::read_to_string(path).map_err(|e| ToolboxError::file(path, e))?;
        Ok(serde_json::from_str(&text)?)
    } else {
        Ok(serde_json::from_str(input)?)
    }
}

/// Two-space indented JSON with non-ASCII characters left unescaped
pub fn prettify(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Run a JSON operation. Failures report `valid: false`.
pub fn json_transform(request: &JsonOperation) -> ToolResult {
    tracing::info!("json_parse: operation={}", request.operation);

    match try_transform(request) {
        Ok(outcome) => ToolResult::success(NAME, &outcome),
        Err(e) => {
            tracing::error!("json_parse failed: {}", e);
            ToolResult::error(NAME, e.to_string()).with_field("valid", false)
        }
    }
}

fn try_transform(request: &JsonOperation) -> Result<JsonOutcome> {
    let op: JsonOp = request.operation.parse()?;
    let data = load_document(&request.input)?;

    Ok(match op {
        JsonOp::Parse => JsonOutcome::Parsed {
            operation: op.as_str(),
            data,
            valid: true,
        },
        JsonOp::Validate => JsonOutcome::Validated {
            operation: op.as_str(),
            valid: true,
            message: VALID_MESSAGE,
        },
        JsonOp::Prettify => JsonOutcome::Prettified {
            operation: op.as_str(),
            result: prettify(&data)?,
        },
    })
}

/// Tool for parsing and reformatting JSON
pub struct JsonParseTool;

impl Tool for JsonParseTool {
    fn name(&self) -> &str {
        NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME.to_string(),
            description: "Parse, validate or prettify JSON. The input may be a JSON string or a path to a JSON file.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("input", "JSON string or file path", true)
                .enumeration("operation", "Operation to perform (default: parse)", &JsonOp::ALL, false)
                .default_value("operation", "parse")
                .build(),
        }
    }

    fn call(&self, input: Value) -> Result<ToolResult> {
        let request: JsonOperation = parse_arguments(input)?;
        Ok(json_transform(&request))
    }
}
