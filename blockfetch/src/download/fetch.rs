//! Single-block ranged transfer.
//!
//! Each block is fetched on its own connection with an inclusive
//! `Range` header and `Connection: close`, then the payload is cut
//! out of the drained response.

use std::io::{self, Write};

use tracing::warn;

use crate::download::plan::Block;
use crate::error::{DownloadError, Result};
use crate::net::{self, Connector};
use crate::uri::RemoteTarget;

/// Marker separating headers from body in an HTTP response.
const HEADER_DELIMITER: &[u8] = b"\r\n\r\n";

/// Fetch one block of the resource.
///
/// Opens a fresh connection (no reuse across blocks), sends a ranged
/// `GET`, reads until the peer closes the stream, and returns the
/// response body. Any transport error maps to
/// [`DownloadError::TransferFailed`] for this block's index.
pub fn fetch_block<C: Connector>(
    connector: &C,
    target: &RemoteTarget,
    port: u16,
    block: &Block,
) -> Result<Vec<u8>> {
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nRange: bytes={}-{}\r\nConnection: close\r\n\r\n",
        target.path, target.host, block.start, block.end
    );

    let transfer_error = |source: io::Error| DownloadError::TransferFailed {
        index: block.index,
        source,
    };

    let mut stream = connector
        .connect(&target.host, port)
        .map_err(transfer_error)?;
    stream.write_all(request.as_bytes()).map_err(transfer_error)?;
    let response = net::read_to_close(&mut stream).map_err(transfer_error)?;

    Ok(extract_body(&response, block.index))
}

/// Everything after the first header/body delimiter.
///
/// A response without the delimiter yields an empty payload instead of
/// an error; the condition is logged so a silently empty block stays
/// traceable.
fn extract_body(response: &[u8], index: u64) -> Vec<u8> {
    match response
        .windows(HEADER_DELIMITER.len())
        .position(|w| w == HEADER_DELIMITER)
    {
        Some(pos) => response[pos + HEADER_DELIMITER.len()..].to_vec(),
        None => {
            warn!(block = index, "response had no header/body delimiter");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::testing::ScriptedConnector;

    fn block() -> Block {
        Block {
            index: 1,
            start: 400,
            end: 799,
        }
    }

    #[test]
    fn test_fetch_sends_ranged_get() {
        let connector = ScriptedConnector::new(vec![
            b"HTTP/1.1 206 Partial Content\r\nContent-Length: 4\r\n\r\nwxyz".to_vec(),
        ]);
        let target = RemoteTarget::parse("http://example.com/data.bin");

        let payload = fetch_block(&connector, &target, 80, &block()).unwrap();
        assert_eq!(payload, b"wxyz");

        let requests = connector.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("GET /data.bin HTTP/1.1\r\n"));
        assert!(requests[0].contains("Range: bytes=400-799\r\n"));
        assert!(requests[0].contains("Connection: close\r\n"));
    }

    #[test]
    fn test_fetch_maps_connect_failure_to_block_index() {
        let connector = ScriptedConnector::new(vec![]);
        let target = RemoteTarget::parse("http://example.com/data.bin");

        match fetch_block(&connector, &target, 80, &block()) {
            Err(DownloadError::TransferFailed { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected TransferFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_body_splits_on_first_delimiter() {
        let raw = b"HTTP/1.1 206 Partial Content\r\nX: y\r\n\r\nbody\r\n\r\nmore";
        assert_eq!(extract_body(raw, 0), b"body\r\n\r\nmore");
    }

    #[test]
    fn test_extract_body_without_delimiter_is_empty() {
        assert!(extract_body(b"HTTP/1.1 206 Partial Content\r\n", 0).is_empty());
    }

    #[test]
    fn test_extract_body_empty_body() {
        assert!(extract_body(b"HTTP/1.1 204 No Content\r\n\r\n", 0).is_empty());
    }

    #[test]
    fn test_extract_body_binary_payload() {
        let mut raw = b"HTTP/1.1 206 Partial Content\r\n\r\n".to_vec();
        raw.extend_from_slice(&[0, 159, 146, 150]);
        assert_eq!(extract_body(&raw, 0), vec![0, 159, 146, 150]);
    }
}
