// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! File resources addressed as `file://{path}`
//!
//! Failures are embedded in the returned text as `Error: <reason>`.

use std::path::Path;

use crate::tools::builtin::file_read::{read_text, TextEncoding};

/// URI template advertised by `resources/templates/list`
pub const FILE_URI_TEMPLATE: &str = "file://{path}";

pub const FILE_URI_SCHEME: &str = "file://";

pub const FILE_RESOURCE_NAME: &str = "project_file";

pub const FILE_RESOURCE_MIME_TYPE: &str = "text/plain";

/// Extract the path from a `file://` URI
pub fn path_from_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(FILE_URI_SCHEME)
        .filter(|path| !path.is_empty())
}

/// Full UTF-8 text of `path`, or an `Error: ...` string
pub fn get_resource(path: &str) -> String {
    tracing::info!("resource request: file://{}", path);

    match read_text(Path::new(path), TextEncoding::utf8()) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("resource error: {}", e);
            format!("Error: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_from_uri() {
        assert_eq!(path_from_uri("file:///etc/hosts"), Some("/etc/hosts"));
        assert_eq!(path_from_uri("file://README.md"), Some("README.md"));
        assert_eq!(path_from_uri("file://"), None);
        assert_eq!(path_from_uri("http://example.com"), None);
    }

    #[test]
    fn test_get_resource_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.md");
        std::fs::write(&path, "# Notes\n").unwrap();

        assert_eq!(get_resource(&path.to_string_lossy()), "# Notes\n");
    }

    #[test]
    fn test_get_resource_translates_line_breaks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dos.txt");
        std::fs::write(&path, "one\r\ntwo\rthree").unwrap();

        assert_eq!(get_resource(&path.to_string_lossy()), "one\ntwo\nthree");
    }

    #[test]
    fn test_get_resource_missing_file_returns_error_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.md");

        let text = get_resource(&path.to_string_lossy());
        assert!(text.starts_with("Error: "));
        assert!(text.contains("missing.md"));
    }

    #[test]
    fn test_get_resource_invalid_utf8_returns_error_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.bin");
        std::fs::write(&path, [0xff, 0xfe]).unwrap();

        assert!(get_resource(&path.to_string_lossy()).starts_with("Error: "));
    }
}
