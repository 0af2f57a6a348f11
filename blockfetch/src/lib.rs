//! Blockfetch - resumable block-based HTTP downloader.
//!
//! Retrieves a remote file over plain HTTP by splitting it into
//! fixed-size byte ranges, fetching each block with a separate
//! request, and persisting progress so an interrupted transfer
//! resumes without re-fetching completed blocks.

pub mod download;
pub mod error;
pub mod logging;
pub mod net;
pub mod timecheck;
pub mod units;
pub mod uri;

pub use download::{DownloadReport, Engine, EngineConfig};
pub use error::{DownloadError, Result};

/// Crate version, for CLI banners.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
