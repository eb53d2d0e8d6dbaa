// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! File read tool
//!
//! Reads the full text of a file in a given encoding.

use encoding_rs::{Encoding, REPLACEMENT, UTF_16BE, UTF_16LE, UTF_8};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, ToolboxError};
use crate::tools::{parse_arguments, SchemaBuilder, Tool, ToolDefinition, ToolResult};

pub const NAME: &str = "file_read";

/// Arguments for `file_read`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadRequest {
    /// Path to the file
    pub path: String,
    /// Text encoding name
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

impl ReadRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            encoding: default_encoding(),
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

/// A resolved text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// 7-bit ASCII; any byte above 0x7f is an error
    Ascii,
    /// ISO-8859-1, each byte is the code point of the same value
    Latin1,
    /// Any encoding known to `encoding_rs`
    Standard(&'static Encoding),
}

impl TextEncoding {
    pub fn utf8() -> Self {
        Self::Standard(UTF_8)
    }

    /// Resolve an encoding label, ignoring case and `-`/`_` spelling
    pub fn from_label(label: &str) -> Result<Self> {
        let lowered = label.trim().to_ascii_lowercase();
        let dashed = lowered.replace('_', "-");

        match dashed.as_str() {
            "ascii" | "us-ascii" | "646" => return Ok(Self::Ascii),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" | "iso88591" | "l1" | "cp819" => {
                return Ok(Self::Latin1)
            }
            _ => {}
        }

        Encoding::for_label(lowered.as_bytes())
            .or_else(|| Encoding::for_label(dashed.as_bytes()))
            .or_else(|| Encoding::for_label(dashed.replace('-', "").as_bytes()))
            .or_else(|| codec_alias(&dashed).and_then(|l| Encoding::for_label(l.as_bytes())))
            .filter(|encoding| *encoding != REPLACEMENT)
            .map(Self::Standard)
            .ok_or_else(|| ToolboxError::Encoding(format!("unknown encoding: {}", label)))
    }

    /// Decode raw bytes into text. Undecodable bytes are an error.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String> {
        match self {
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(pos) => Err(ToolboxError::Encoding(format!(
                    "'ascii' codec can't decode byte 0x{:02x} in position {}",
                    bytes[pos], pos
                ))),
                // all bytes are ASCII, so this is valid UTF-8
                None => String::from_utf8(bytes)
                    .map_err(|e| ToolboxError::Encoding(e.to_string())),
            },
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Standard(encoding) => {
                // UTF-16 honours a byte order mark, like a generic utf-16 codec
                let (encoding, body) = match Encoding::for_bom(&bytes) {
                    Some((bom, len)) if is_utf16(encoding) && is_utf16(bom) => (bom, &bytes[len..]),
                    _ => (encoding, &bytes[..]),
                };

                encoding
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(Cow::into_owned)
                    .ok_or_else(|| {
                        ToolboxError::Encoding(format!(
                            "'{}' codec can't decode the file contents",
                            encoding.name()
                        ))
                    })
            }
        }
    }
}

fn is_utf16(encoding: &'static Encoding) -> bool {
    encoding == UTF_16LE || encoding == UTF_16BE
}

/// Codec names in common use that are not WHATWG labels
fn codec_alias(label: &str) -> Option<&'static str> {
    match label {
        "cp949" | "uhc" | "ms949" => Some("windows-949"),
        "cp932" | "ms-kanji" => Some("shift_jis"),
        "cp936" => Some("gbk"),
        "big5hkscs" | "cp950" => Some("big5"),
        _ => None,
    }
}

/// Successful read payload
#[derive(Debug, Clone, Serialize)]
pub struct FileContent {
    pub path: String,
    pub encoding: String,
    pub content: String,
    /// Character count of the decoded text
    pub size: usize,
    /// Newline count plus one
    pub lines: usize,
}

impl FileContent {
    fn new(path: &str, encoding: &str, content: String) -> Self {
        Self {
            path: path.to_string(),
            encoding: encoding.to_string(),
            size: content.chars().count(),
            lines: line_count(&content),
            content,
        }
    }
}

/// Number of `'\n'` characters plus one; an empty text has one line
pub fn line_count(content: &str) -> usize {
    content.matches('\n').count() + 1
}

/// Read a whole file as text in the given encoding, with `\r\n` and lone
/// `\r` line breaks translated to `\n`
pub fn read_text(path: &Path, encoding: TextEncoding) -> Result<String> {
    let mut file = File::open(path).map_err(|e| ToolboxError::file(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| ToolboxError::file(path, e))?;
    Ok(normalize_newlines(encoding.decode(bytes)?))
}

/// Translate `\r\n` and `\r` to `\n`
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read a file. Failures carry only the error message.
pub fn read(request: &ReadRequest) -> ToolResult {
    tracing::info!(
        "file_read: path={}, encoding={}",
        request.path,
        request.encoding
    );

    match try_read(request) {
        Ok(content) => ToolResult::success(NAME, &content),
        Err(e) => {
            tracing::error!("file_read failed: {}", e);
            ToolResult::error(NAME, e.to_string())
        }
    }
}

fn try_read(request: &ReadRequest) -> Result<FileContent> {
    let encoding = TextEncoding::from_label(&request.encoding)?;
    let content = read_text(Path::new(&request.path), encoding)?;
    Ok(FileContent::new(&request.path, &request.encoding, content))
}

/// Tool for reading file contents
pub struct FileReadTool;

impl Tool for FileReadTool {
    fn name(&self) -> &str {
        NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME.to_string(),
            description: "Read the full contents of a file. Returns the text, its size and line count.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("path", "Path of the file to read", true)
                .string("encoding", "Text encoding (default: utf-8)", false)
                .default_value("encoding", "utf-8")
                .build(),
        }
    }

    fn call(&self, input: Value) -> Result<ToolResult> {
        let request: ReadRequest = parse_arguments(input)?;
        Ok(read(&request))
    }
}
