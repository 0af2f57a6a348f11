//! Blocking transport primitives.
//!
//! Every request in this crate opens one fresh connection, writes a
//! complete request, drains the response until the peer closes, and
//! discards the connection. The [`Connector`] trait is the seam that
//! lets tests substitute the network with scripted streams.

use std::io::{self, Read, Write};
use std::net::TcpStream;

/// Read buffer size for draining responses.
const READ_BUFFER_SIZE: usize = 4096;

/// Factory for blocking byte-stream connections.
pub trait Connector {
    type Stream: Read + Write;

    /// Open a new connection to `host` on `port`.
    fn connect(&self, host: &str, port: u16) -> io::Result<Self::Stream>;
}

/// Production connector backed by `std::net::TcpStream`.
///
/// No connect or read timeout is set at this layer; a stalled peer
/// stalls the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        TcpStream::connect((host, port))
    }
}

/// Drain a stream until the peer closes it.
pub fn read_to_close<S: Read>(stream: &mut S) -> io::Result<Vec<u8>> {
    let mut response = Vec::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    loop {
        match stream.read(&mut buffer)? {
            0 => break,
            n => response.extend_from_slice(&buffer[..n]),
        }
    }
    Ok(response)
}
