// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Built-in tools

pub mod file_read;
pub mod file_search;
pub mod health_check;
pub mod json_parse;

pub use file_read::{read, FileContent, FileReadTool, ReadRequest, TextEncoding};
pub use file_search::{search, FileSearchTool, SearchQuery, SearchReport};
pub use health_check::{health_check, HealthCheckTool, HealthStatus};
pub use json_parse::{json_transform, JsonOp, JsonOperation, JsonParseTool};

/// Names of the built-in tools, as reported by `health_check`
pub const TOOL_NAMES: [&str; 4] = [
    file_search::NAME,
    file_read::NAME,
    json_parse::NAME,
    health_check::NAME,
];
