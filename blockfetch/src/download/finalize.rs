//! Assembly of completed blocks into the output artifact.
//!
//! Only runs once every block index is marked saved. Blocks are
//! concatenated in ascending index order, then the temporary block
//! files and the ledger record are purged.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{DownloadError, Result};

/// File name for a block's temporary store.
pub fn block_file_name(index: u64) -> String {
    format!("block_{}.tmp", index)
}

/// Concatenate all block files in `state_dir` into `output`, then
/// delete the block files and the ledger record.
///
/// Fails fatally on any read or write error; in that case temporary
/// state (and a possibly partial output) is left in place for
/// inspection.
pub fn assemble(
    state_dir: &Path,
    num_blocks: u64,
    output: &Path,
    ledger_path: &Path,
) -> Result<()> {
    let out_file = File::create(output).map_err(|e| finalize_error(output, e))?;
    let mut writer = BufWriter::new(out_file);

    for index in 0..num_blocks {
        let block_path = state_dir.join(block_file_name(index));
        let bytes = fs::read(&block_path).map_err(|e| finalize_error(&block_path, e))?;
        writer
            .write_all(&bytes)
            .map_err(|e| finalize_error(output, e))?;
    }
    writer.flush().map_err(|e| finalize_error(output, e))?;

    for index in 0..num_blocks {
        let block_path = state_dir.join(block_file_name(index));
        fs::remove_file(&block_path).map_err(|e| finalize_error(&block_path, e))?;
    }
    if let Err(e) = fs::remove_file(ledger_path) {
        // A zero-block job never persisted a ledger.
        if e.kind() != io::ErrorKind::NotFound {
            return Err(finalize_error(ledger_path, e));
        }
    }

    info!(output = %output.display(), blocks = num_blocks, "download assembled");
    Ok(())
}

fn finalize_error(path: &Path, source: io::Error) -> DownloadError {
    DownloadError::FinalizeFailed {
        path: path.to_path_buf(),
        source,
    }
}
