//! Transport-level failures.

use std::io;

/// Error returned by a [`Transport`](super::Transport) when it cannot hand
/// back a usable response.
///
/// A response with a non-success status is *not* an error at this layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// libcurl reported a failure (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The remote could not be reached (used by non-curl transports).
    #[error("connection failed: {0}")]
    Connect(String),
    /// The body exceeded the configured limit and the transfer was aborted.
    #[error("response body exceeded {limit} bytes")]
    BodyTooLarge { limit: u64 },
    /// A secure request was redirected to a plaintext location. The
    /// location is never requested.
    #[error("secure request redirected to insecure location {location}")]
    InsecureRedirect { location: String },
    /// More redirects than the configured limit.
    #[error("more than {limit} redirects")]
    TooManyRedirects { limit: u32 },
    /// Local setup failed before any request was sent (e.g. unreadable fixture).
    #[error("transport setup: {0}")]
    Setup(#[source] io::Error),
}

impl TransportError {
    /// True when the failure happened locally and says nothing about the remote.
    pub fn is_local(&self) -> bool {
        matches!(self, TransportError::Setup(_))
    }

    /// True when the remote answered but the answer was refused by a limit
    /// or by redirect policy.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            TransportError::BodyTooLarge { .. }
                | TransportError::InsecureRedirect { .. }
                | TransportError::TooManyRedirects { .. }
        )
    }
}
