//! Remote target resolution.
//!
//! Splits a URI into the host and path needed to build raw HTTP
//! requests. No host validation is performed; malformed input simply
//! fails later at the transport layer.

use std::time::{SystemTime, UNIX_EPOCH};

/// Host and request path of the resource to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    /// Host name or address, without scheme or path.
    pub host: String,
    /// Request path, always starting with `/`.
    pub path: String,
}

impl RemoteTarget {
    /// Parse a URI, optionally prefixed with `http://`.
    ///
    /// The remainder is split on the first `/`: everything before it
    /// is the host, everything from it onward is the path. Without a
    /// `/` the path defaults to `/`.
    pub fn parse(uri: &str) -> Self {
        let rest = uri.strip_prefix("http://").unwrap_or(uri);
        match rest.split_once('/') {
            Some((host, tail)) => Self {
                host: host.to_string(),
                path: format!("/{}", tail),
            },
            None => Self {
                host: rest.to_string(),
                path: "/".to_string(),
            },
        }
    }

    /// Name of the final output artifact.
    ///
    /// The last path segment, or a timestamped synthetic name when the
    /// path denotes a directory.
    pub fn output_filename(&self) -> String {
        if self.path.ends_with('/') {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            format!("file_{}.bin", now)
        } else {
            self.path
                .rsplit('/')
                .next()
                .unwrap_or(self.path.as_str())
                .to_string()
        }
    }
}
