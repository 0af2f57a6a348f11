//! Minimal HTTP range server used by the end-to-end tests.
//!
//! Serves a fixed byte buffer: `HEAD` returns the content length (and
//! optionally `Accept-Ranges: bytes`), `GET` honors a single
//! `bytes=<start>-<end>` range. Every response closes the connection,
//! matching the client's `Connection: close` protocol.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

pub struct TestServer {
    pub port: u16,
    gets_served: Arc<AtomicUsize>,
}

impl TestServer {
    /// Number of GET requests served so far.
    pub fn gets_served(&self) -> usize {
        self.gets_served.load(Ordering::SeqCst)
    }
}

/// Serve `content` with range support until the test process exits.
pub fn serve(content: Vec<u8>) -> TestServer {
    spawn(content, true, None)
}

/// Serve `content` but without advertising range support.
pub fn serve_without_ranges(content: Vec<u8>) -> TestServer {
    spawn(content, false, None)
}

/// Serve `content`, then stop accepting after `max_requests`
/// connections. Later connects are refused, which the client sees as
/// a transfer failure.
pub fn serve_limited(content: Vec<u8>, max_requests: usize) -> TestServer {
    spawn(content, true, Some(max_requests))
}

fn spawn(content: Vec<u8>, accept_ranges: bool, max_requests: Option<usize>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let port = listener.local_addr().expect("local addr").port();
    let gets_served = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&gets_served);

    thread::spawn(move || {
        let mut served = 0usize;
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            handle(&mut stream, &content, accept_ranges, &counter);
            served += 1;
            if let Some(limit) = max_requests {
                if served >= limit {
                    break;
                }
            }
        }
    });

    TestServer { port, gets_served }
}

fn handle(stream: &mut TcpStream, content: &[u8], accept_ranges: bool, gets: &AtomicUsize) {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf).unwrap_or(0);
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
        if request.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    let text = String::from_utf8_lossy(&request);

    if text.starts_with("HEAD") {
        let ranges_header = if accept_ranges {
            "Accept-Ranges: bytes\r\n"
        } else {
            ""
        };
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
            content.len(),
            ranges_header
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    gets.fetch_add(1, Ordering::SeqCst);

    let (start, end) = parse_range(&text).unwrap_or((0, content.len().saturating_sub(1)));
    let end = end.min(content.len().saturating_sub(1));
    let body = &content[start..=end];

    let response = format!(
        "HTTP/1.1 206 Partial Content\r\nContent-Length: {}\r\nContent-Range: bytes {}-{}/{}\r\nConnection: close\r\n\r\n",
        body.len(),
        start,
        end,
        content.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}

fn parse_range(request: &str) -> Option<(usize, usize)> {
    let line = request
        .lines()
        .find(|l| l.to_ascii_lowercase().starts_with("range:"))?;
    let spec = line.split_once('=')?.1.trim();
    let (start, end) = spec.split_once('-')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}
