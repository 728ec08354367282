//! Log output in the `<timestamp> - <target> - <level> - <message>` shape,
//! built on the `tracing` ecosystem, plus the [`LogSink`] interface the
//! workflow components receive instead of reaching for a global logger.

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter};

/// Target used for all workflow events, doubling as the logger name in the
/// formatted output.
pub const LOG_TARGET: &str = "subtitle_renamer";

/// Message sink injected into each workflow component.
///
/// Components log through this interface only; the production implementation
/// forwards to `tracing`, tests record the lines instead.
pub trait LogSink {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// [`LogSink`] that emits `tracing` events under [`LOG_TARGET`].
pub struct TracingSink;

impl LogSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!(target: LOG_TARGET, "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: LOG_TARGET, "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: LOG_TARGET, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: LOG_TARGET, "{message}");
    }
}

/// Event format producing `<timestamp> - <target> - <level> - <message>`
/// lines for both the console and the file handler.
struct LineFormat;

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
    ) -> std::fmt::Result {
        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            event.metadata().target(),
            level_name(event.metadata().level()),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_name(level: &Level) -> &'static str {
    if *level == Level::ERROR {
        "ERROR"
    } else if *level == Level::WARN {
        "WARNING"
    } else if *level == Level::INFO {
        "INFO"
    } else if *level == Level::DEBUG {
        "DEBUG"
    } else {
        "TRACE"
    }
}

/// Initialize the global subscriber: a stderr handler always, plus an
/// appending file handler when `log_to_file` is set.
///
/// Respects `RUST_LOG`, defaulting to `debug`. The returned guard must be
/// held for the process lifetime so buffered file lines are flushed on exit.
pub fn init(log_to_file: bool, log_file: &Path) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let console = fmt::layer()
        .event_format(LineFormat)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter).with(console);

    if log_to_file {
        let file_name = log_file
            .file_name()
            .ok_or_else(|| anyhow!("invalid log file path: {}", log_file.display()))?;
        let directory = match log_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
            directory, file_name,
        ));
        registry
            .with(
                fmt::layer()
                    .event_format(LineFormat)
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .init();
        Ok(Some(guard))
    } else {
        registry.init();
        Ok(None)
    }
}
