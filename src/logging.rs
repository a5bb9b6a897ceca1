//! Logging System
//!
//! Structured logging using the `tracing` crate. Stdout carries the single
//! result line read by the supervisor, so logs default to stderr.

use crate::config::xdg;
use crate::error::CheckError;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration (`[logging]` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// `EnvFilter` directive, usually a bare level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// json or text
    #[serde(default = "default_format")]
    pub format: String,

    /// stdout, stderr, file, file+stderr or both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file when output includes file; None means the state directory default
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(CheckError::Config(format!(
                "Invalid log format: {other} (must be 'json' or 'text')"
            ))),
        }
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogTargets {
    stdout: bool,
    stderr: bool,
    file: bool,
}

impl FromStr for LogTargets {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stdout, stderr, file) = match s {
            "stdout" => (true, false, false),
            "stderr" => (false, true, false),
            "file" => (false, false, true),
            "file+stderr" => (false, true, true),
            "both" => (true, true, false),
            other => {
                return Err(CheckError::Config(format!(
                    "Invalid log output: {other} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')"
                )))
            }
        };
        Ok(Self {
            stdout,
            stderr,
            file,
        })
    }
}

/// Install the global subscriber.
///
/// `SIZECHECK_LOG`, `SIZECHECK_LOG_FORMAT`, `SIZECHECK_LOG_OUTPUT` and
/// `SIZECHECK_LOG_FILE` take precedence over `config`, which already carries
/// the CLI flags and the configuration file.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CheckError> {
    let init_error =
        |e: TryInitError| CheckError::Config(format!("Failed to initialize logging: {e}"));

    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(init_error);
    }

    let filter = env_filter(config);
    let format: LogFormat = env_or("SIZECHECK_LOG_FORMAT", &config.format).parse()?;
    let targets: LogTargets = env_or("SIZECHECK_LOG_OUTPUT", &config.output).parse()?;
    let writer = make_writer(targets, config)?;

    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer);
    let registry = Registry::default().with(filter);
    let result = match format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Text => {
            let ansi = !targets.file && !targets.stdout && std::io::stderr().is_terminal();
            registry.with(layer.with_ansi(ansi)).try_init()
        }
    };
    result.map_err(init_error)
}

fn env_or(var: &str, fallback: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env("SIZECHECK_LOG").unwrap_or_else(|_| EnvFilter::new(&config.level))
}

fn make_writer(targets: LogTargets, config: &LoggingConfig) -> Result<BoxMakeWriter, CheckError> {
    if !targets.file {
        return Ok(match (targets.stdout, targets.stderr) {
            (true, true) => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
            (true, false) => BoxMakeWriter::new(std::io::stdout),
            _ => BoxMakeWriter::new(std::io::stderr),
        });
    }

    let path = log_file_path(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CheckError::Config(format!("Failed to create log directory: {e}")))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            CheckError::Config(format!("Failed to open log file {}: {e}", path.display()))
        })?;

    Ok(if targets.stderr {
        BoxMakeWriter::new(file.and(std::io::stderr))
    } else {
        BoxMakeWriter::new(file)
    })
}

/// `SIZECHECK_LOG_FILE`, then the configured file, then `<state dir>/sizecheck.log`.
fn log_file_path(config: &LoggingConfig) -> Result<PathBuf, CheckError> {
    let from_env = std::env::var_os("SIZECHECK_LOG_FILE").map(PathBuf::from);
    match from_env
        .into_iter()
        .chain(config.file.clone())
        .find(|p| !p.as_os_str().is_empty())
    {
        Some(path) => Ok(path),
        None => xdg::default_log_file(),
    }
}
