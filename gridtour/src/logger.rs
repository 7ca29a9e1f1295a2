//! Log setup for the binary.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter};

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Errors raised while installing the logger.
#[derive(Debug)]
pub enum LoggerInitError {
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    Install(log::SetLoggerError),
}

impl fmt::Display for LoggerInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogFile { path, .. } => write!(f, "cannot open log file {}", path.display()),
            Self::Install(_) => f.write_str("cannot install the logger"),
        }
    }
}

impl std::error::Error for LoggerInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LogFile { source, .. } => Some(source),
            Self::Install(e) => Some(e),
        }
    }
}

/// Level for a `-v` count: warnings only by default, then info, debug and
/// trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. Output goes to `log_file` when given and to
/// stderr otherwise, so it never mixes with plain or json output on stdout.
///
/// Must be called at most once.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<(), LoggerInitError> {
    let level = level_for(verbosity);
    EPOCH.get_or_init(Instant::now);

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            let elapsed = EPOCH.get().map_or(0.0, |t| t.elapsed().as_secs_f64());
            // Targets only matter once crate internals start talking.
            if record.level() > Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    elapsed,
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    elapsed,
                    level_to_str(record.level()),
                    message
                ))
            }
        })
        .level(level);

    let dispatch = match log_file {
        Some(path) => dispatch.chain(fern::log_file(path).map_err(|source| {
            LoggerInitError::LogFile {
                path: path.to_path_buf(),
                source,
            }
        })?),
        None => dispatch.chain(std::io::stderr()),
    };
    dispatch.apply().map_err(LoggerInitError::Install)?;

    log::info!("logging at {level}");
    Ok(())
}

fn level_to_str(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRC",
        Level::Debug => "DBG",
        Level::Info => "INF",
        Level::Warn => "WRN",
        Level::Error => "ERR",
    }
}
