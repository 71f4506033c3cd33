//! Discovery target construction.

use super::ResolveError;
use std::fmt;
use url::Url;

/// Query key marking a request as a discovery probe.
pub const DISCOVERY_MARKER: &str = "ac-discovery";

/// Transport scheme a target is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// TLS-authenticated transport, always tried first.
    Https,
    /// Plaintext transport, only tried when the caller allows it.
    Http,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }

    pub fn is_secure(self) -> bool {
        matches!(self, Scheme::Https)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build `<scheme>://<name>?ac-discovery=1`.
///
/// `name` is used verbatim; the result is only checked to parse as a URL.
pub fn discovery_target(scheme: Scheme, name: &str) -> Result<String, ResolveError> {
    let target = format!("{}://{}?{}=1", scheme, name, DISCOVERY_MARKER);
    if let Err(source) = Url::parse(&target) {
        return Err(ResolveError::InvalidTarget { target, source });
    }
    Ok(target)
}
