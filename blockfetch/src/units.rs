//! Human-readable byte-size parsing.

use crate::error::{DownloadError, Result};

/// Parse a byte-size string with an optional `K`/`M`/`G` suffix
/// (base 1024). Case-insensitive, surrounding whitespace ignored.
///
/// No upper bound is enforced beyond what `u64` can represent; a
/// suffixed value that would overflow is rejected as malformed.
/// Callers must reject a zero block size before it reaches range
/// planning.
pub fn parse_block_size(input: &str) -> Result<u64> {
    let normalized = input.trim().to_ascii_uppercase();

    let (digits, multiplier) = if let Some(prefix) = normalized.strip_suffix('K') {
        (prefix, 1024u64)
    } else if let Some(prefix) = normalized.strip_suffix('M') {
        (prefix, 1024 * 1024)
    } else if let Some(prefix) = normalized.strip_suffix('G') {
        (prefix, 1024 * 1024 * 1024)
    } else {
        (normalized.as_str(), 1)
    };

    let value: u64 = digits
        .trim()
        .parse()
        .map_err(|_| DownloadError::InvalidSizeFormat(input.to_string()))?;

    value
        .checked_mul(multiplier)
        .ok_or_else(|| DownloadError::InvalidSizeFormat(input.to_string()))
}
