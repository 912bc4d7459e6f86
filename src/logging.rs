use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};
use eyre::Result;
use log::LevelFilter;

use crate::config::get_app_data_prefix;

pub const LOG_FILE_NAME: &str = "popread.log";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// `--debug` wins over any number of `-v`.
    pub fn from_flags(verbose: u8, debug: bool) -> Self {
        if debug {
            return LogLevel::Debug;
        }
        match verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

pub fn log_file_path() -> Result<PathBuf> {
    Ok(get_app_data_prefix()?.join(LOG_FILE_NAME))
}

/// Sends log records to a file, since stderr is unusable while the terminal
/// is in the alternate screen. `RUST_LOG` overrides `level`.
pub fn init(level: LogLevel) -> Result<()> {
    let path = log_file_path()?;
    init_to_file(level, &path)
}

pub fn init_to_file(level: LogLevel, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.filter().as_str()));
    builder.target(Target::Pipe(Box::new(file)));
    // A second init (tests, re-entry) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}

/// Logger for non-interactive commands: plain stderr.
pub fn init_stderr(level: LogLevel) {
    let _ = Builder::from_env(Env::default().default_filter_or(level.filter().as_str()))
        .target(Target::Stderr)
        .try_init();
}
