// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP transport layer - line-delimited JSON-RPC
//!
//! MCP servers communicate via stdio (standard input/output) using JSON-RPC
//! 2.0, one message per line.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use tokio::sync::Mutex;

use super::protocol::JsonRpcResponse;
use crate::error::Result;

/// One non-blank input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Trimmed line text
    Text(String),
    /// A line whose bytes are not valid UTF-8
    InvalidUtf8,
}

/// Line transport over any reader/writer pair
pub struct LineTransport<R, W> {
    reader: Mutex<R>,
    writer: Mutex<W>,
}

/// Transport bound to the process stdin/stdout
pub type StdioTransport = LineTransport<BufReader<Stdin>, Stdout>;

impl StdioTransport {
    /// Create a new stdio transport
    pub fn stdio() -> Self {
        LineTransport::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
        }
    }

    /// Read the next non-blank line, or `None` at end of input.
    /// Only I/O failures are errors; bad encoding is reported as a frame.
    pub async fn read_message(&self) -> Result<Option<Frame>> {
        let mut reader = self.reader.lock().await;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        return Ok(Some(Frame::Text(trimmed.to_string())));
                    }
                }
                Err(_) => return Ok(Some(Frame::InvalidUtf8)),
            }
        }
    }

    /// Write a JSON-RPC response as a single line
    pub async fn write_response(&self, response: &JsonRpcResponse) -> Result<()> {
        let json = serde_json::to_string(response)?;

        let mut writer = self.writer.lock().await;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        Ok(())
    }

    /// Recover the writer, e.g. to inspect what was sent
    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }
}
