//! Capability probing via a header-only request.
//!
//! One `HEAD` request tells us everything range planning needs: the
//! total content length and whether the server serves byte ranges.

use std::io::{self, Write};

use tracing::debug;

use crate::error::{DownloadError, Result};
use crate::net::{self, Connector};
use crate::uri::RemoteTarget;

/// What the probe learned about the remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceInfo {
    /// Total size from `Content-Length`, when present and numeric.
    pub content_length: Option<u64>,
    /// Whether `Accept-Ranges` advertises byte ranges.
    pub accepts_ranges: bool,
}

/// Issue the capability probe against `target`.
///
/// Opens one connection, sends a `HEAD` request with
/// `Connection: close`, and drains the response until the peer closes
/// the stream. Transport errors map to [`DownloadError::ProbeFailed`].
pub fn probe<C: Connector>(connector: &C, target: &RemoteTarget, port: u16) -> Result<ResourceInfo> {
    let request = format!(
        "HEAD {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        target.path, target.host
    );

    let mut stream = connector
        .connect(&target.host, port)
        .map_err(|e| probe_error(target, e))?;
    stream
        .write_all(request.as_bytes())
        .map_err(|e| probe_error(target, e))?;
    let response = net::read_to_close(&mut stream).map_err(|e| probe_error(target, e))?;

    let info = parse_head_response(&response);
    debug!(
        content_length = ?info.content_length,
        accepts_ranges = info.accepts_ranges,
        "probe complete"
    );
    Ok(info)
}

fn probe_error(target: &RemoteTarget, source: io::Error) -> DownloadError {
    DownloadError::ProbeFailed {
        url: format!("http://{}{}", target.host, target.path),
        reason: source.to_string(),
    }
}

/// Parse the probe response headers into a typed result.
///
/// Case-insensitive on header names; only the section before the first
/// blank line is scanned. A missing or non-numeric `Content-Length`
/// yields `None` rather than a guess, and the first occurrence wins
/// when a header repeats.
pub fn parse_head_response(raw: &[u8]) -> ResourceInfo {
    let headers = match raw.windows(4).position(|w| w == b"\r\n\r\n") {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let text = String::from_utf8_lossy(headers);

    let mut info = ResourceInfo {
        content_length: None,
        accepts_ranges: false,
    };
    for line in text.split("\r\n") {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.eq_ignore_ascii_case("content-length") {
            if info.content_length.is_none() {
                info.content_length = value.trim().parse().ok();
            }
        } else if name.eq_ignore_ascii_case("accept-ranges")
            && value.to_ascii_lowercase().contains("bytes")
        {
            info.accepts_ranges = true;
        }
    }
    info
}
