//! Subscriber installation for `tracing` events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as fmt_layer, EnvFilter};

/// Environment variable that overrides the configured filter.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Errors raised while setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter in {LOG_FILTER_ENV}: {0}")]
    InvalidFilter(String),

    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Unknown log format: {0}")]
    UnknownFormat(String),
}

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LoggingError::UnknownLevel(s.to_string())),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for terminals).
    #[default]
    Human,
    /// JSON format, one object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnknownFormat(s.to_string())),
        }
    }
}

/// The `[logging]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: LogLevel, format: LogFormat) -> Self {
        Self { level, format }
    }

    /// Raise the level to at least `debug`.
    pub fn verbose(mut self) -> Self {
        self.level = self.level.min(LogLevel::Debug);
        self
    }

    /// Filter from `RUST_LOG`, falling back to the configured level.
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::builder()
            .with_default_directive(self.level.level_filter().into())
            .from_env()
            .map_err(|e| LoggingError::InvalidFilter(e.to_string()))
    }
}

/// Install the global subscriber. Events go to stderr so stdout stays clean.
///
/// Returns `Ok(false)` when a subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<bool, LoggingError> {
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Human => registry
            .with(
                fmt_layer::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt_layer::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    Ok(installed.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!(matches!(
            "loud".parse::<LogLevel>(),
            Err(LoggingError::UnknownLevel(_))
        ));
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(LogLevel::Info.as_str(), "info");
    }

    #[test]
    fn test_verbose_only_raises() {
        let quiet = LoggingConfig::default();
        assert_eq!(quiet.verbose().level, LogLevel::Debug);

        let trace = LoggingConfig::new(LogLevel::Trace, LogFormat::Json);
        assert_eq!(trace.verbose().level, LogLevel::Trace);
    }

    #[test]
    fn test_config_serde() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level": "info", "format": "json"}"#).unwrap();
        assert_eq!(config, LoggingConfig::new(LogLevel::Info, LogFormat::Json));

        let config: LoggingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Human);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_second_init_is_noop() {
        let config = LoggingConfig::default();
        init_logging(&config).unwrap();
        assert!(!init_logging(&config).unwrap());
    }
}
