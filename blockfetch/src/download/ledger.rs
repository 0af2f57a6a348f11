//! Durable resume state for an in-progress download.
//!
//! The ledger is the only state that survives a crash: the job's
//! identity plus the indices of blocks whose payload files are already
//! on disk. All mutation flows through [`ResumeLedger`]; nothing else
//! touches the record file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DownloadError, Result};

/// Identity of a download job.
///
/// Any change to these three fields invalidates prior progress:
/// resumption is all-or-nothing per exact-match job identity, never
/// per byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Source URI as given on the command line.
    pub uri: String,
    /// Block size in bytes.
    pub block_size: u64,
    /// Total content length reported by the probe.
    pub content_length: u64,
}

/// Persisted record of a job and its completed block indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeLedger {
    #[serde(flatten)]
    job: JobDescriptor,
    #[serde(rename = "downloaded_blocks")]
    saved: Vec<u64>,
}

impl ResumeLedger {
    /// File name of the ledger record within the state directory.
    pub const FILE_NAME: &'static str = "blockfetch_status.json";

    fn start(job: JobDescriptor) -> Self {
        Self {
            job,
            saved: Vec::new(),
        }
    }

    /// Load the record at `path` if it matches `job`, otherwise start
    /// a fresh one with an empty saved set.
    ///
    /// An unreadable or mismatching record is discarded, never
    /// partially applied.
    pub fn load_or_start(path: &Path, job: JobDescriptor) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::start(job),
        };
        match serde_json::from_str::<ResumeLedger>(&contents) {
            Ok(ledger) if ledger.job == job => {
                info!(saved = ledger.saved.len(), "resuming previous download");
                ledger
            }
            Ok(_) => {
                debug!("ledger describes a different job, starting fresh");
                Self::start(job)
            }
            Err(e) => {
                debug!(error = %e, "ledger unreadable, starting fresh");
                Self::start(job)
            }
        }
    }

    /// The job this ledger belongs to.
    pub fn job(&self) -> &JobDescriptor {
        &self.job
    }

    /// Whether `index` is already durably saved.
    pub fn is_saved(&self, index: u64) -> bool {
        self.saved.contains(&index)
    }

    /// Record `index` as saved and persist the ledger immediately.
    ///
    /// Callers must have written the block's payload file first, so
    /// the on-disk record never claims a block that is not on disk.
    pub fn mark_saved(&mut self, index: u64, path: &Path) -> Result<()> {
        if !self.saved.contains(&index) {
            self.saved.push(index);
            self.saved.sort_unstable();
        }
        self.persist(path)
    }

    /// Full rewrite of the record via temp file and rename.
    fn persist(&self, path: &Path) -> Result<()> {
        let write_error = |reason: String| DownloadError::LedgerWriteFailed {
            path: path.to_path_buf(),
            reason,
        };

        let contents =
            serde_json::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|e| write_error(e.to_string()))?;
        fs::rename(&tmp, path).map_err(|e| write_error(e.to_string()))?;
        Ok(())
    }
}
