//! Command line arguments, runtime configuration and log setup

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::state::IdPolicy;

/// Longest accepted load delay.
pub const MAX_LOAD_DELAY: Duration = Duration::from_secs(60);

/// House listing board
#[derive(Parser, Debug)]
#[command(name = "listing-board")]
#[command(about = "Browse houses currently on the market")]
pub struct Args {
    /// Delay before the simulated listing fetch completes, in milliseconds
    #[arg(long, default_value = "500")]
    pub load_delay_ms: u64,

    /// Give added listings the next free id instead of the fixed demo id
    #[arg(long)]
    pub unique_ids: bool,

    /// Write logs to this file (logging is off without it)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "listing_board=trace"
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Verbose logging (debug level, every dispatched action)
    #[arg(long)]
    pub debug: bool,
}

/// Validated settings the app runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub load_delay: Duration,
    pub id_policy: IdPolicy,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_delay: crate::fetch::DEFAULT_LOAD_DELAY,
            id_policy: IdPolicy::default(),
            log_file: None,
            log_filter: "info".to_string(),
            debug: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    LoadDelayTooLong(Duration),
    InvalidLogFilter { directive: String, reason: String },
    LogFile { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadDelayTooLong(delay) => write!(
                f,
                "Load delay of {}ms exceeds the maximum of {}ms",
                delay.as_millis(),
                MAX_LOAD_DELAY.as_millis()
            ),
            ConfigError::InvalidLogFilter { directive, reason } => {
                write!(f, "Invalid log filter {:?}: {}", directive, reason)
            }
            ConfigError::LogFile { path, source } => {
                write!(f, "Cannot open log file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::LogFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let load_delay = Duration::from_millis(args.load_delay_ms);
        if load_delay > MAX_LOAD_DELAY {
            return Err(ConfigError::LoadDelayTooLong(load_delay));
        }

        let log_filter = match args.log_filter {
            Some(directive) => directive,
            None if args.debug => "debug".to_string(),
            None => "info".to_string(),
        };
        // Reject bad directives before the terminal is taken over
        EnvFilter::try_new(&log_filter).map_err(|err| ConfigError::InvalidLogFilter {
            directive: log_filter.clone(),
            reason: err.to_string(),
        })?;

        Ok(Config {
            load_delay,
            id_policy: if args.unique_ids {
                IdPolicy::NextFree
            } else {
                IdPolicy::Fixed
            },
            log_file: args.log_file,
            log_filter,
            debug: args.debug,
        })
    }
}

/// Install the global `tracing` subscriber writing to the configured file.
///
/// Returns `Ok(false)` when no log file is configured; the terminal owns
/// stdout, so there is nowhere else to write.
pub fn init_logging(config: &Config) -> Result<bool, ConfigError> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };

    let file = open_log_file(path).map_err(|source| ConfigError::LogFile {
        path: path.clone(),
        source,
    })?;
    let filter = EnvFilter::try_new(&config.log_filter).map_err(|err| {
        ConfigError::InvalidLogFilter {
            directive: config.log_filter.clone(),
            reason: err.to_string(),
        }
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(true)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("listing-board").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::try_from(parse(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.load_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_flags() {
        let config = Config::try_from(parse(&[
            "--load-delay-ms",
            "20",
            "--unique-ids",
            "--debug",
            "--log-file",
            "board.log",
        ]))
        .unwrap();

        assert_eq!(config.load_delay, Duration::from_millis(20));
        assert_eq!(config.id_policy, IdPolicy::NextFree);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.log_file, Some(PathBuf::from("board.log")));
    }

    #[test]
    fn test_explicit_filter_wins_over_debug() {
        let config =
            Config::try_from(parse(&["--debug", "--log-filter", "listing_core=trace"])).unwrap();
        assert_eq!(config.log_filter, "listing_core=trace");
    }

    #[test]
    fn test_rejects_long_delay() {
        let err = Config::try_from(parse(&["--load-delay-ms", "600000"])).unwrap_err();
        assert!(matches!(err, ConfigError::LoadDelayTooLong(_)));
        assert!(err.to_string().contains("60000ms"));
    }

    #[test]
    fn test_rejects_bad_filter() {
        let err = Config::try_from(parse(&["--log-filter", "listing_board=loud"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogFilter { .. }));
    }

    #[test]
    fn test_no_log_file_means_no_logging() {
        assert!(!init_logging(&Config::default()).unwrap());
    }
}
