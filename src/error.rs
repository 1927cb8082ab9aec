//! Error types shared across the crate.

use thiserror::Error;

/// Failures surfaced by model construction, training and checkpointing.
///
/// There is no retry path anywhere: configuration problems are reported
/// before any work starts, and anything that fails mid-run aborts the run.
#[derive(Debug, Error)]
pub enum WganError {
    /// Invalid dimensions, arguments or paths supplied by the caller.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The tensor engine rejected an operation.
    #[error("training step failed: {0}")]
    Training(#[from] tch::TchError),

    /// Checkpoint directory or file could not be accessed.
    #[error("checkpoint i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WganError>;
