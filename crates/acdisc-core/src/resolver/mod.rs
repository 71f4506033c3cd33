//! Secure-first discovery resolution.
//!
//! A name is first fetched over `https`. Only when that attempt fails *and*
//! the caller passed `insecure_allowed = true` is the same name fetched over
//! plain `http`. A caller that does not opt in can never be downgraded, even
//! when the secure endpoint is missing entirely.

mod error;
mod target;

pub use error::ResolveError;
pub use target::{discovery_target, Scheme, DISCOVERY_MARKER};

use crate::config::DiscoveryConfig;
use crate::transport::{Body, CurlTransport, Headers, Response, Transport};

/// Successful resolution: the target that answered `200 OK` and its body.
///
/// Target and body only ever exist together; failure is a [`ResolveError`].
#[derive(Debug)]
pub struct Resolution {
    /// Full target that was fetched, e.g. `https://example.com/app?ac-discovery=1`.
    pub target: String,
    pub scheme: Scheme,
    pub status: u32,
    pub headers: Headers,
    /// Caller-owned document body; dropping it releases the connection/file.
    pub body: Body,
}

impl Resolution {
    pub fn is_secure(&self) -> bool {
        self.scheme.is_secure()
    }

    pub fn into_parts(self) -> (String, Body) {
        (self.target, self.body)
    }
}

/// Resolves names through an injected [`Transport`]. Holds no per-call state,
/// so one resolver may serve concurrent callers if `T` is `Sync`.
#[derive(Debug, Clone)]
pub struct Resolver<T = CurlTransport> {
    transport: T,
}

impl Resolver<CurlTransport> {
    /// Resolver backed by libcurl with limits from `cfg`.
    pub fn from_config(cfg: &DiscoveryConfig) -> Self {
        Self::with_transport(CurlTransport::from_config(cfg))
    }
}

impl Default for Resolver<CurlTransport> {
    fn default() -> Self {
        Self::with_transport(CurlTransport::default())
    }
}

impl<T: Transport> Resolver<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch `name` over https, falling back to http only if `insecure_allowed`.
    ///
    /// At most one request per scheme. When both fail the http error is
    /// returned; when fallback is not allowed the https error is returned.
    /// Local failures ([`ResolveError::is_local`]) are returned without fallback.
    pub fn resolve(&self, name: &str, insecure_allowed: bool) -> Result<Resolution, ResolveError> {
        let secure_err = match self.attempt(name, Scheme::Https) {
            Ok(resolution) => {
                tracing::info!(name, url = %resolution.target, "resolved over https");
                return Ok(resolution);
            }
            Err(e) => e,
        };

        if secure_err.is_local() {
            tracing::debug!(name, error = %secure_err, "local failure, not falling back");
            return Err(secure_err);
        }
        if !insecure_allowed {
            tracing::debug!(
                name,
                kind = secure_err.kind().as_str(),
                error = %secure_err,
                "https failed and insecure fallback not allowed"
            );
            return Err(secure_err);
        }

        tracing::warn!(
            name,
            kind = secure_err.kind().as_str(),
            error = %secure_err,
            "https failed, falling back to insecure http"
        );

        match self.attempt(name, Scheme::Http) {
            Ok(resolution) => {
                tracing::info!(name, url = %resolution.target, "resolved over insecure http");
                Ok(resolution)
            }
            Err(e) => {
                tracing::debug!(name, kind = e.kind().as_str(), error = %e, "http failed");
                Err(e)
            }
        }
    }

    fn attempt(&self, name: &str, scheme: Scheme) -> Result<Resolution, ResolveError> {
        let target = discovery_target(scheme, name)?;
        tracing::debug!(name, %scheme, url = %target, "discovery attempt");

        let response = match self.transport.get(&target) {
            Ok(response) => response,
            Err(e) => return Err(ResolveError::from_transport(target, e)),
        };
        if !response.is_ok() {
            let status = response.status;
            // Release the error body before returning or trying the next scheme.
            drop(response);
            return Err(ResolveError::from_status(target, status));
        }

        let Response {
            status,
            headers,
            body,
        } = response;
        Ok(Resolution {
            target,
            scheme,
            status,
            headers,
            body,
        })
    }
}
