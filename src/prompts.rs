// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Prompt templates

pub const CODE_REVIEW_PROMPT: &str = "code_review_template";

pub const CODE_REVIEW_ARGUMENT: &str = "file_path";

pub const CODE_REVIEW_DESCRIPTION: &str = "Code review checklist for a single file";

/// Render the code review checklist for `file_path`
pub fn review_prompt(file_path: &str) -> String {
    format!(
        "
Please review the following code:

File: {file_path}

Checklist:
1. Code quality (readability, maintainability)
2. Adherence to best practices
3. Potential bugs
4. Performance improvement opportunities
5. Security vulnerabilities

Please provide your review.
"
    )
}
