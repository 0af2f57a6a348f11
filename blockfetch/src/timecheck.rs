//! RFC 868 time protocol client (UDP).
//!
//! Single-shot companion to the downloader: send an empty datagram to
//! port 37, receive the time as a 32-bit big-endian count of seconds
//! since 1900-01-01 00:00 GMT, and convert it to a Unix timestamp.

use std::io;
use std::net::UdpSocket;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Time protocol port (RFC 868).
pub const TIME_PORT: u16 = 37;

/// Offset between the RFC 868 epoch (1900-01-01) and the Unix epoch.
const SECONDS_1900_TO_1970: i64 = 2_208_988_800;

/// How long to wait for the reply datagram.
const REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from a time query.
#[derive(Debug, Error)]
pub enum TimeError {
    /// Socket-level failure while sending or receiving.
    #[error("time query failed: {0}")]
    Io(#[from] io::Error),

    /// The server replied with something other than 4 bytes.
    #[error("invalid reply length: expected 4 bytes, got {0}")]
    InvalidReply(usize),

    /// The decoded timestamp is outside the representable range.
    #[error("timestamp {0} is out of range")]
    OutOfRange(i64),
}

/// Query a time server on the standard port.
pub fn query_time(host: &str) -> Result<DateTime<Utc>, TimeError> {
    query_time_at(host, TIME_PORT)
}

/// Query a time server on an explicit port.
pub fn query_time_at(host: &str, port: u16) -> Result<DateTime<Utc>, TimeError> {
    let socket = UdpSocket::bind(("0.0.0.0", 0))?;
    socket.connect((host, port))?;
    socket.set_read_timeout(Some(REPLY_TIMEOUT))?;

    socket.send(&[])?;
    let mut reply = [0u8; 8];
    let received = socket.recv(&mut reply)?;
    if received != 4 {
        return Err(TimeError::InvalidReply(received));
    }

    let since_1900 = u32::from_be_bytes([reply[0], reply[1], reply[2], reply[3]]);
    let unix_seconds = i64::from(since_1900) - SECONDS_1900_TO_1970;
    DateTime::<Utc>::from_timestamp(unix_seconds, 0).ok_or(TimeError::OutOfRange(unix_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// One-shot UDP server replying with a fixed datagram.
    fn spawn_time_server(reply: Vec<u8>) -> u16 {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = socket.local_addr().unwrap().port();
        thread::spawn(move || {
            let mut buf = [0u8; 16];
            let (_, peer) = socket.recv_from(&mut buf).unwrap();
            socket.send_to(&reply, peer).unwrap();
        });
        port
    }

    #[test]
    fn test_query_decodes_big_endian_seconds() {
        // 2,208,988,800 + 86,400 seconds = 1970-01-02 00:00:00 UTC.
        let value: u32 = 2_208_988_800 + 86_400;
        let port = spawn_time_server(value.to_be_bytes().to_vec());

        let time = query_time_at("127.0.0.1", port).unwrap();
        assert_eq!(time.timestamp(), 86_400);
    }

    #[test]
    fn test_query_rejects_short_reply() {
        let port = spawn_time_server(vec![0, 1]);

        match query_time_at("127.0.0.1", port) {
            Err(TimeError::InvalidReply(2)) => {}
            other => panic!("expected InvalidReply(2), got {:?}", other),
        }
    }
}
