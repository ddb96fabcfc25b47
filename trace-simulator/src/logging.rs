//! Structured logging initialization.
//!
//! Logs are written to stderr so stdout carries nothing but results. The
//! RUST_LOG environment variable takes precedence over the `--log-level`
//! command line setting.

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Verbosity accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Failures only
    Error,
    /// Failures and suspicious input
    #[default]
    Warn,
    /// Progress of each run
    Info,
    /// Engine construction and replay summaries
    Debug,
    /// Every eviction and promotion
    Trace,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Initialize the logging subsystem.
///
/// Does nothing if a global subscriber is already installed.
pub fn init(level: LogLevel) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level.as_str())
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time(),
    );
    let _ = subscriber.try_init();
}
