// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Logging setup
//!
//! Every event is written as `[YYYY-MM-DD HH:MM:SS,mmm] LEVEL - message` to
//! stderr and appended to the configured log file. stdout is reserved for the
//! protocol stream.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, ToolboxError};

/// Event formatter producing `[timestamp] LEVEL - message` lines
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "[{}] {} - ",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Default filter directive for a verbosity count
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Open the log file for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ToolboxError::file(parent, e))?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ToolboxError::file(path, e))
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init(log_file: &Path, verbose: u8) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let (writer, file_error) = match open_log_file(log_file) {
        Ok(file) => (
            BoxMakeWriter::new(std::io::stderr.and(Mutex::new(file))),
            None,
        ),
        Err(e) => (BoxMakeWriter::new(std::io::stderr), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(writer)
        .event_format(LineFormat)
        .try_init()
        .map_err(|e| ToolboxError::Logging(e.to_string()))?;

    if let Some(e) = file_error {
        tracing::warn!("Logging to stderr only: {}", e);
    }

    Ok(())
}
