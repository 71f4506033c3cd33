//! Resolve errors: one variant per failure cause.

use crate::transport::{classify, FailureKind, TransportError};
use std::io;

/// Why a resolution failed. Carries the target of the attempt that failed
/// last; when fallback was denied that is the secure target.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The name does not form a valid URL.
    #[error("invalid discovery target {target}: {source}")]
    InvalidTarget {
        target: String,
        source: url::ParseError,
    },
    /// The transport could not be prepared (e.g. unreadable local source).
    #[error("{target}: transport setup failed: {source}")]
    Setup { target: String, source: io::Error },
    /// No HTTP response could be obtained.
    #[error("{target}: unreachable: {source}")]
    Unreachable {
        target: String,
        source: TransportError,
    },
    /// A response arrived but was refused: body over the size limit, a
    /// redirect off https, or too many redirects.
    #[error("{target}: response rejected: {source}")]
    Rejected {
        target: String,
        source: TransportError,
    },
    /// The remote answered 404 or 410.
    #[error("{target}: not found (HTTP {status})")]
    NotFound { target: String, status: u32 },
    /// The remote answered with any other non-200 status.
    #[error("{target}: unexpected HTTP {status}")]
    HttpStatus { target: String, status: u32 },
}

impl ResolveError {
    pub(crate) fn from_transport(target: String, err: TransportError) -> Self {
        match err {
            TransportError::Setup(source) => ResolveError::Setup { target, source },
            source if source.is_rejected() => ResolveError::Rejected { target, source },
            source => ResolveError::Unreachable { target, source },
        }
    }

    pub(crate) fn from_status(target: String, status: u32) -> Self {
        match status {
            404 | 410 => ResolveError::NotFound { target, status },
            _ => ResolveError::HttpStatus { target, status },
        }
    }

    /// Target of the failed attempt.
    pub fn target(&self) -> &str {
        match self {
            ResolveError::InvalidTarget { target, .. }
            | ResolveError::Setup { target, .. }
            | ResolveError::Unreachable { target, .. }
            | ResolveError::Rejected { target, .. }
            | ResolveError::NotFound { target, .. }
            | ResolveError::HttpStatus { target, .. } => target,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ResolveError::InvalidTarget { .. } | ResolveError::Setup { .. } => FailureKind::Local,
            ResolveError::Unreachable { source, .. } | ResolveError::Rejected { source, .. } => {
                classify(source)
            }
            ResolveError::NotFound { status, .. } | ResolveError::HttpStatus { status, .. } => {
                FailureKind::Status(*status)
            }
        }
    }

    /// Local failures end the call without trying another scheme.
    pub fn is_local(&self) -> bool {
        self.kind() == FailureKind::Local
    }
}
