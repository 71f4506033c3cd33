//! Classify transport failures and HTTP statuses for logging and error reporting.

use super::TransportError;

/// Coarse failure category attached to log records and resolve errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connect or transfer timed out.
    Timeout,
    /// Network-level failure (refused, DNS, TLS handshake, reset).
    Connection,
    /// The remote answered with a non-200 status.
    Status(u32),
    /// The remote answered but the response was refused (size limit,
    /// redirect policy).
    Rejected,
    /// Failure on this side of the wire (bad target, unreadable fixture).
    Local,
    /// Anything else.
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connection => "connection",
            FailureKind::Status(_) => "status",
            FailureKind::Rejected => "rejected",
            FailureKind::Local => "local",
            FailureKind::Other => "other",
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}

/// Classify a transport error.
pub fn classify(e: &TransportError) -> FailureKind {
    match e {
        TransportError::Curl(ce) => classify_curl_error(ce),
        TransportError::Connect(_) => FailureKind::Connection,
        TransportError::BodyTooLarge { .. }
        | TransportError::InsecureRedirect { .. }
        | TransportError::TooManyRedirects { .. } => FailureKind::Rejected,
        TransportError::Setup(_) => FailureKind::Local,
    }
}
