//! HTTP transport seam.
//!
//! The resolver only talks to the network through [`Transport`]. Production
//! code uses [`CurlTransport`] (libcurl); tests install [`FakeTransport`] or
//! their own implementation to make network behavior deterministic.

mod classify;
mod error;
pub mod fake;
mod http;
mod parse;

pub use self::classify::{classify, classify_curl_error, FailureKind};
pub use self::error::TransportError;
pub use self::fake::FakeTransport;
pub use self::http::CurlTransport;

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

/// Fetches a fully-formed target and returns the response, whatever its status.
///
/// Implementations must not retry; fallback policy lives in the resolver.
pub trait Transport: Send + Sync {
    fn get(&self, target: &str) -> Result<Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, target: &str) -> Result<Response, TransportError> {
        (**self).get(target)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(&self, target: &str) -> Result<Response, TransportError> {
        (**self).get(target)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, target: &str) -> Result<Response, TransportError> {
        (**self).get(target)
    }
}

/// A completed HTTP exchange.
#[derive(Debug)]
pub struct Response {
    /// HTTP status code of the last hop (after redirects).
    pub status: u32,
    /// Headers of the final response.
    pub headers: Headers,
    /// Document body, positioned at the start.
    pub body: Body,
}

impl Response {
    pub fn new(status: u32, headers: Headers, body: Body) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// True for `200 OK`, the only status that counts as a discovery hit.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Response headers with case-insensitive lookup. Names are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any earlier value with the same name.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.0
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("content-type")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Headers {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Owned, readable response body. Dropping it releases the underlying
/// buffer, file, or socket.
pub struct Body {
    inner: Box<dyn Read + Send>,
}

impl Body {
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            inner: Box::new(reader),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(Cursor::new(bytes.into()))
    }

    pub fn empty() -> Self {
        Self::from_bytes(Vec::new())
    }

    pub fn from_file(file: File) -> Self {
        Self::from_reader(file)
    }

    /// Reads the remaining body into memory.
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.inner.read_to_end(&mut buf)?;
        Ok(buf)
    }

    pub fn into_string(self) -> io::Result<String> {
        let bytes = self.into_bytes()?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish_non_exhaustive()
    }
}
