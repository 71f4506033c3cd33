//! Production transport backed by libcurl.

use super::parse::parse_header_lines;
use super::{Body, Response, Transport, TransportError};
use crate::config::DiscoveryConfig;
use std::path::PathBuf;
use std::str;
use std::time::Duration;
use url::Url;

/// Blocking libcurl GET. One `Easy` handle per hop, so a single
/// `CurlTransport` can be shared across threads.
///
/// Redirects are followed here rather than by libcurl so every `Location`
/// can be checked before it is requested: a chain that starts on https never
/// leaves it.
///
/// Call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
    max_redirections: u32,
    max_body_bytes: u64,
    user_agent: String,
    ca_file: Option<PathBuf>,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::from_config(&DiscoveryConfig::default())
    }
}

impl CurlTransport {
    pub fn from_config(cfg: &DiscoveryConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_redirections: cfg.max_redirections,
            max_body_bytes: cfg.max_body_bytes,
            user_agent: cfg.user_agent.clone(),
            ca_file: cfg.ca_file.clone(),
        }
    }

    /// One request, no redirect following.
    fn fetch_once(&self, url: &str) -> Result<Hop, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let mut exceeded = false;
        let limit = self.max_body_bytes;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(false)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        easy.useragent(&self.user_agent)?;
        if let Some(ca_file) = &self.ca_file {
            easy.cainfo(ca_file)?;
        }

        tracing::debug!(url, "GET");

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                if body.len() as u64 + data.len() as u64 > limit {
                    exceeded = true;
                    return Ok(0); // abort transfer
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };
        if exceeded {
            return Err(TransportError::BodyTooLarge { limit });
        }
        performed?;

        let status = easy.response_code()?;
        let location = if (300..400).contains(&status) {
            easy.redirect_url()?.map(str::to_string)
        } else {
            None
        };
        tracing::debug!(url, status, bytes = body.len(), "response");

        Ok(Hop {
            status,
            header_lines,
            body,
            location,
        })
    }
}

struct Hop {
    status: u32,
    header_lines: Vec<String>,
    body: Vec<u8>,
    /// Absolute redirect target, only for 3xx responses carrying `Location`.
    location: Option<String>,
}

impl Transport for CurlTransport {
    fn get(&self, target: &str) -> Result<Response, TransportError> {
        let secure = is_https(target);
        let mut url = target.to_string();
        let mut redirects = 0u32;

        loop {
            let hop = self.fetch_once(&url)?;
            let Some(location) = hop.location else {
                return Ok(Response::new(
                    hop.status,
                    parse_header_lines(&hop.header_lines),
                    Body::from_bytes(hop.body),
                ));
            };

            check_redirect(secure, &location)?;
            if redirects >= self.max_redirections {
                return Err(TransportError::TooManyRedirects {
                    limit: self.max_redirections,
                });
            }
            redirects += 1;
            tracing::debug!(from = %url, to = %location, status = hop.status, "following redirect");
            url = location;
        }
    }
}

fn is_https(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| u.scheme() == "https")
}

/// Refuse a redirect that would take a secure request off https. Runs before
/// the location is requested.
fn check_redirect(secure: bool, location: &str) -> Result<(), TransportError> {
    if secure && !is_https(location) {
        tracing::warn!(location, "refusing redirect from https to non-https location");
        return Err(TransportError::InsecureRedirect {
            location: location.to_string(),
        });
    }
    Ok(())
}
