//! Block partitioning of the target resource.
//!
//! Pure range arithmetic, no I/O. The computed blocks are contiguous,
//! non-overlapping, and exactly cover `[0, total_length)`.

use crate::error::{DownloadError, Result};

/// A contiguous byte range of the resource, fetched independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Block index (0-based); index order is assembly order.
    pub index: u64,
    /// First byte offset of the block.
    pub start: u64,
    /// Last byte offset of the block (inclusive).
    pub end: u64,
}

/// Compute the block layout for `total_length` bytes at `block_size`
/// bytes per block. The last block may be shorter.
///
/// Errors on a zero block size; a zero-length resource yields an
/// empty plan.
pub fn plan_blocks(total_length: u64, block_size: u64) -> Result<Vec<Block>> {
    if block_size == 0 {
        return Err(DownloadError::InvalidBlockSize);
    }

    let count = total_length.div_ceil(block_size);
    let mut blocks = Vec::with_capacity(count as usize);
    for index in 0..count {
        let start = index * block_size;
        let end = (start + block_size - 1).min(total_length - 1);
        blocks.push(Block { index, start, end });
    }
    Ok(blocks)
}
