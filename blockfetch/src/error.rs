//! Error types for the download engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for download operations.
pub type Result<T> = std::result::Result<T, DownloadError>;

/// Errors that can occur while downloading a resource in blocks.
///
/// Only [`DownloadError::TransferFailed`] is recoverable: the saved
/// blocks stay on disk and a later run resumes from the ledger. All
/// other variants are fatal for the job.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Block-size argument could not be parsed.
    #[error("invalid size format {0:?}: expected an integer with optional K/M/G suffix")]
    InvalidSizeFormat(String),

    /// A block size of zero would make range planning impossible.
    #[error("block size must be greater than zero")]
    InvalidBlockSize,

    /// Transport or parse error while probing the resource.
    #[error("probe of {url} failed: {reason}")]
    ProbeFailed { url: String, reason: String },

    /// The server did not advertise byte-range support.
    #[error("server does not support range requests")]
    UnsupportedRanges,

    /// A single block transfer (or the write of its temporary store)
    /// failed. Rerunning the same job resumes from the saved blocks.
    #[error("transfer of block {index} failed: {source}")]
    TransferFailed {
        index: u64,
        #[source]
        source: io::Error,
    },

    /// The resume ledger could not be persisted.
    #[error("failed to write resume ledger {path}: {reason}")]
    LedgerWriteFailed { path: PathBuf, reason: String },

    /// Error while assembling blocks or purging transient state.
    /// Temporary files are left in place for inspection.
    #[error("finalization failed at {path}: {source}")]
    FinalizeFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_failed_display_names_block() {
        let err = DownloadError::TransferFailed {
            index: 7,
            source: io::Error::new(io::ErrorKind::ConnectionReset, "peer reset"),
        };
        assert!(err.to_string().contains("block 7"));
        assert!(err.to_string().contains("peer reset"));
    }

    #[test]
    fn test_invalid_size_format_display() {
        let err = DownloadError::InvalidSizeFormat("x".to_string());
        assert!(err.to_string().contains("\"x\""));
        assert!(err.to_string().contains("K/M/G"));
    }
}
