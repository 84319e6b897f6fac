//! Logging infrastructure for Chroma.

use std::io;
use std::path::PathBuf;

use tracing_subscriber::{
    filter::LevelFilter,
    fmt,
    layer::{Layered, SubscriberExt},
    registry::Registry,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Environment variable names read by [`LogConfig::from_env`].
pub mod vars {
    pub const LOG_LEVEL: &str = "CHROMA_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "CHROMA_LOG_FORMAT";
    pub const LOG_FILE: &str = "CHROMA_LOG_FILE";
    pub const LOG_SOURCE: &str = "CHROMA_LOG_SOURCE";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include timestamps.
    pub timestamps: bool,
    /// Include source location.
    pub source_location: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Level selected by `-v` repetitions, or `error` when quiet.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        match verbose {
            0 if quiet => Self::Error,
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file_path: None,
            timestamps: false,
            source_location: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let level = std::env::var(vars::LOG_LEVEL).or_else(|_| std::env::var(vars::RUST_LOG));
        if let Some(l) = level.ok().as_deref().and_then(LogLevel::parse) {
            config.level = l;
        }

        if let Ok(format) = std::env::var(vars::LOG_FORMAT) {
            config.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }

        if let Ok(file_path) = std::env::var(vars::LOG_FILE) {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Ok(source_location) = std::env::var(vars::LOG_SOURCE) {
            config.source_location =
                source_location.eq_ignore_ascii_case("true") || source_location == "1";
        }

        config
    }

    /// Override the level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

type Inner = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Inner> + Send + Sync + 'static>;

fn format_layer<W>(config: &LogConfig, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    match (config.format, config.timestamps) {
        (LogFormat::Json, _) => base.json().boxed(),
        (LogFormat::Compact, true) => base.compact().boxed(),
        (LogFormat::Compact, false) => base.compact().without_time().boxed(),
        (LogFormat::Pretty, true) => base.boxed(),
        (LogFormat::Pretty, false) => base.without_time().boxed(),
    }
}

/// Initialize logging with the given configuration.
///
/// Log lines go to stderr so generated output on stdout stays clean. An
/// explicit `RUST_LOG` filter directive takes precedence over `level`.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let mut layers = vec![format_layer(&config, io::stderr, true)];

    if let Some(file_path) = &config.file_path {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        layers.push(format_layer(&config, std::sync::Mutex::new(file), false));
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(|e| LogError::InitError(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};

/// Span and timing helpers.
pub mod spans;

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("invalid"), None);
    }

    #[test]
    fn test_log_level_from() {
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(LogLevel::from_verbosity(0, true), LogLevel::Error);
        assert_eq!(LogLevel::from_verbosity(0, false), LogLevel::Warn);
        assert_eq!(LogLevel::from_verbosity(1, false), LogLevel::Info);
        assert_eq!(LogLevel::from_verbosity(2, false), LogLevel::Debug);
        assert_eq!(LogLevel::from_verbosity(7, false), LogLevel::Trace);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(!config.timestamps);
        assert!(!config.source_location);
    }

    // Single test so the env mutations cannot race each other.
    #[test]
    fn test_config_from_env() {
        let saved: Vec<_> = [
            vars::LOG_LEVEL,
            vars::LOG_FORMAT,
            vars::LOG_FILE,
            vars::LOG_SOURCE,
            vars::RUST_LOG,
        ]
        .into_iter()
        .map(|var| (var, env::var(var).ok()))
        .collect();

        env::set_var(vars::LOG_LEVEL, "debug");
        env::set_var(vars::LOG_FORMAT, "json");
        env::set_var(vars::LOG_FILE, "/tmp/chroma-test.log");
        env::set_var(vars::LOG_SOURCE, "true");

        let config = LogConfig::from_env();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file_path, Some(PathBuf::from("/tmp/chroma-test.log")));
        assert!(config.source_location);

        // RUST_LOG is the fallback when CHROMA_LOG_LEVEL is unset
        env::remove_var(vars::LOG_LEVEL);
        env::set_var(vars::RUST_LOG, "error");
        assert_eq!(LogConfig::from_env().level, LogLevel::Error);

        for (var, value) in saved {
            match value {
                Some(v) => env::set_var(var, v),
                None => env::remove_var(var),
            }
        }
    }

    #[test]
    fn test_init_writes_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chroma.log");
        let config = LogConfig {
            format: LogFormat::Json,
            file_path: Some(path.clone()),
            ..Default::default()
        };

        init(config).unwrap();
        error!(color = "crimson", "log file probe");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("log file probe"));
        assert!(content.contains("crimson"));

        // The global subscriber can only be installed once
        assert!(matches!(init(LogConfig::default()), Err(LogError::InitError(_))));
    }
}
