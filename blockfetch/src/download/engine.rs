//! End-to-end download orchestration.
//!
//! Sequences the other components into one run:
//! resolve the URI, probe capabilities, plan the blocks, validate the
//! resume ledger, fetch pending blocks one at a time, and finally
//! assemble the output artifact.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::download::fetch::fetch_block;
use crate::download::finalize::{assemble, block_file_name};
use crate::download::ledger::{JobDescriptor, ResumeLedger};
use crate::download::plan::plan_blocks;
use crate::download::probe::probe;
use crate::error::{DownloadError, Result};
use crate::net::{Connector, TcpConnector};
use crate::uri::RemoteTarget;

/// Default port for plain HTTP.
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Configuration for one download run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Source URI, optionally prefixed with `http://`.
    pub uri: String,
    /// Block size in bytes; must be greater than zero.
    pub block_size: u64,
    /// TCP port to connect to.
    pub port: u16,
    /// Directory holding the ledger, the temporary block files, and
    /// the output artifact. Must exist.
    pub state_dir: PathBuf,
}

impl EngineConfig {
    /// Create a config with the default port and the current working
    /// directory as state directory.
    pub fn new(uri: impl Into<String>, block_size: u64) -> Self {
        Self {
            uri: uri.into(),
            block_size,
            port: DEFAULT_HTTP_PORT,
            state_dir: PathBuf::from("."),
        }
    }

    /// Set the TCP port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the state directory. The directory must exist.
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    /// Path of the assembled output artifact.
    pub output: PathBuf,
    /// Total number of blocks in the plan.
    pub num_blocks: u64,
    /// Blocks fetched during this run.
    pub fetched: u64,
    /// Blocks skipped because a prior run already saved them.
    pub skipped: u64,
}

/// The download orchestrator.
///
/// Generic over [`Connector`] so tests can run against scripted
/// streams; production code uses [`Engine::new`] with the TCP
/// connector.
pub struct Engine<C: Connector> {
    config: EngineConfig,
    connector: C,
}

impl Engine<TcpConnector> {
    /// Create an engine backed by real TCP connections.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_connector(config, TcpConnector)
    }
}

impl<C: Connector> Engine<C> {
    /// Create an engine with a custom connector.
    pub fn with_connector(config: EngineConfig, connector: C) -> Self {
        Self { config, connector }
    }

    /// Run the download to completion or to its first failure.
    ///
    /// A [`DownloadError::TransferFailed`] return leaves all progress
    /// saved so far on disk; rerunning with the same URI and block
    /// size resumes from there. Probe failures and missing range
    /// support abort before anything is persisted.
    pub fn run(&self) -> Result<DownloadReport> {
        if self.config.block_size == 0 {
            return Err(DownloadError::InvalidBlockSize);
        }

        let target = RemoteTarget::parse(&self.config.uri);
        let info = probe(&self.connector, &target, self.config.port)?;
        if !info.accepts_ranges {
            return Err(DownloadError::UnsupportedRanges);
        }
        let content_length = info.content_length.ok_or_else(|| DownloadError::ProbeFailed {
            url: self.config.uri.clone(),
            reason: "missing or invalid Content-Length".to_string(),
        })?;
        info!(content_length, "resource size known, ranges supported");

        let blocks = plan_blocks(content_length, self.config.block_size)?;
        let num_blocks = blocks.len() as u64;
        info!(
            num_blocks,
            block_size = self.config.block_size,
            "download planned"
        );

        let ledger_path = self.config.state_dir.join(ResumeLedger::FILE_NAME);
        let job = JobDescriptor {
            uri: self.config.uri.clone(),
            block_size: self.config.block_size,
            content_length,
        };
        let mut ledger = ResumeLedger::load_or_start(&ledger_path, job);

        let mut fetched = 0u64;
        let mut skipped = 0u64;
        for block in &blocks {
            if ledger.is_saved(block.index) {
                info!(block = block.index, "block already saved, skipping");
                skipped += 1;
                continue;
            }

            info!(
                block = block.index,
                start = block.start,
                end = block.end,
                "fetching block"
            );
            let payload = fetch_block(&self.connector, &target, self.config.port, block)?;
            if payload.is_empty() {
                warn!(block = block.index, "saving empty payload for block");
            }

            // Payload file first, ledger record second: the record
            // must never claim a block that is not on disk.
            let block_path = self.config.state_dir.join(block_file_name(block.index));
            fs::write(&block_path, &payload).map_err(|source| DownloadError::TransferFailed {
                index: block.index,
                source,
            })?;
            ledger.mark_saved(block.index, &ledger_path)?;
            fetched += 1;
        }

        let output = self.config.state_dir.join(target.output_filename());
        assemble(&self.config.state_dir, num_blocks, &output, &ledger_path)?;

        Ok(DownloadReport {
            output,
            num_blocks,
            fetched,
            skipped,
        })
    }
}
