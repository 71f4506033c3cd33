//! In-memory transport for tests.
//!
//! Serves one fixture document and decides per scheme whether the request
//! succeeds, answers with an error status, or fails to connect. Every
//! requested target is recorded.

use super::{Body, Headers, Response, Transport, TransportError};
use std::fs::File;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
enum Fixture {
    Bytes(Vec<u8>),
    File(PathBuf),
}

/// Scripted [`Transport`] double.
///
/// For a target on a scheme marked successful the fixture is returned with
/// `200 OK` and `Content-Type: text/html`. Otherwise the configured error
/// status is returned with an empty body, or, if none is set, a connection
/// failure.
#[derive(Debug)]
pub struct FakeTransport {
    fixture: Fixture,
    https_ok: bool,
    http_ok: bool,
    error_status: Option<u32>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_fixture(Fixture::Bytes(bytes.into()))
    }

    /// The file is opened on every request; an unreadable file makes every
    /// request fail with [`TransportError::Setup`].
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::with_fixture(Fixture::File(path.into()))
    }

    fn with_fixture(fixture: Fixture) -> Self {
        Self {
            fixture,
            https_ok: false,
            http_ok: false,
            error_status: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn https(mut self, ok: bool) -> Self {
        self.https_ok = ok;
        self
    }

    pub fn http(mut self, ok: bool) -> Self {
        self.http_ok = ok;
        self
    }

    /// Status returned for targets whose scheme is not marked successful.
    pub fn error_status(mut self, status: u32) -> Self {
        self.error_status = Some(status);
        self
    }

    /// Targets requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.log().clone()
    }

    /// Number of requests whose target starts with `prefix` (e.g. `"http://"`).
    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.log()
            .iter()
            .filter(|t| t.starts_with(prefix))
            .count()
    }

    // A test thread that panicked mid-request must not hide the log from the
    // assertions that follow.
    fn log(&self) -> MutexGuard<'_, Vec<String>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open_fixture(&self) -> Result<Body, TransportError> {
        match &self.fixture {
            Fixture::Bytes(bytes) => Ok(Body::from_bytes(bytes.clone())),
            Fixture::File(path) => File::open(path)
                .map(Body::from_file)
                .map_err(TransportError::Setup),
        }
    }
}

impl Transport for FakeTransport {
    fn get(&self, target: &str) -> Result<Response, TransportError> {
        self.log().push(target.to_string());

        let body = self.open_fixture()?;
        let headers: Headers = [("Content-Type", "text/html")].into_iter().collect();

        let ok = (target.starts_with("https://") && self.https_ok)
            || (target.starts_with("http://") && self.http_ok);
        if ok {
            return Ok(Response::new(200, headers, body));
        }
        match self.error_status {
            Some(status) => Ok(Response::new(status, headers, Body::empty())),
            None => Err(TransportError::Connect(format!(
                "{target}: fake transport failed as requested"
            ))),
        }
    }
}
