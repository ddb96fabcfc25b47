//! Error type shared by the simulator's runner, generator and CLI.

use std::io;

use thiserror::Error;
use twoq::ConfigError;

use crate::input::TraceError;

/// Errors that can occur while loading, replaying or reporting a trace.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Cache rejected the trace's capacity
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trace could not be read or parsed
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// CSV report could not be written
    #[error("failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    /// Trace file could not be created or written
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
