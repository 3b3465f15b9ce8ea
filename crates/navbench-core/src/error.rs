//! Error types for the benchmark engine.

use thiserror::Error;

/// Errors that abort a benchmark run before its iteration loop starts.
///
/// Adapter faults inside the loop never surface here; they degrade the
/// affected iteration and are accounted for in
/// [`RunReport`](crate::runner::RunReport).
#[derive(Debug, Error)]
pub enum BenchError {
    /// No adapter factory is registered under the requested scheme name.
    #[error("no protocol adapter registered under {0:?}")]
    UnknownProtocol(String),

    /// Writing to the measurement sink failed.
    #[error("measurement sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, BenchError>;
