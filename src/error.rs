use thiserror::Error;

use crate::source::SourceError;

/// Top-level errors of the reporter.
#[derive(Error, Debug)]
pub enum Error {
    /// The output stream failed; the reporter cannot fulfil its contract
    /// without it, so this is fatal.
    #[error("output stream failed: {0}")]
    Output(#[from] std::io::Error),

    /// A status record could not be serialized.
    #[error("failed to encode status record: {0}")]
    Encode(#[from] serde_json::Error),

    /// The player source failed during startup.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
