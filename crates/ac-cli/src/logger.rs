//! Logging for the `ac` binary.
//!
//! stdout carries the command's JSON result, so log lines go to stderr or to
//! the configured log file, never to stdout.

use crate::{CliClientResult, ClientError};

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// HTTP stack modules that are only interesting when something is broken.
const QUIET_MODULES: [&str; 3] = ["hyper", "hyper_util", "reqwest"];

/// Install the global logger for one CLI run.
///
/// `log_file` of `None` logs to stderr, colored when `colored` is set. The
/// HTTP stack is capped at `warn` so a debug run shows the switch pipeline
/// rather than connection pool chatter.
pub fn initialize(
    log_level: ac_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> CliClientResult<()> {
    let level_filter = log_level.0;

    let output = match &log_file {
        Some(path) => Dispatch::new()
            .format(plain_line)
            .chain(open_log_file(path)?),
        None if colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{date} {level} {target}] {message}",
                        date = humantime::format_rfc3339_seconds(SystemTime::now()),
                        level = colors.color(record.level()),
                        target = record.target(),
                    ))
                })
                .chain(std::io::stderr())
        }
        None => Dispatch::new()
            .format(plain_line)
            .chain(std::io::stderr()),
    };

    let mut dispatch = Dispatch::new().level(level_filter);
    for module in QUIET_MODULES {
        dispatch = dispatch.level_for(module, level_filter.min(LevelFilter::Warn));
    }

    dispatch
        .chain(output)
        .apply()
        .map_err(|e| ClientError::logging(format!("Failed to initialize logger: {e}")))?;

    match &log_file {
        Some(path) => info!("ac logging at {level_filter} to {}", path.display()),
        None => info!("ac logging at {level_filter} to stderr"),
    }

    // Bridge tracing events from the HTTP stack
    tracing_log::LogTracer::init().ok();

    Ok(())
}

/// Opens `path` for appending, creating it and its directory on first use.
pub(crate) fn open_log_file(path: &Path) -> CliClientResult<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ClientError::io(parent.to_path_buf(), e))?;
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ClientError::io(path.to_path_buf(), e))
}

fn plain_line(out: FormatCallback, message: &fmt::Arguments, record: &Record) {
    out.finish(format_args!(
        "[{date} {level} {target}] {message}",
        date = humantime::format_rfc3339_seconds(SystemTime::now()),
        level = record.level(),
        target = record.target(),
    ))
}
