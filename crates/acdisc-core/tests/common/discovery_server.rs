//! Minimal plaintext HTTP/1.1 server for discovery integration tests.
//!
//! Answers every GET with a fixed status and body and records the request
//! target. TLS is not spoken, so an `https://` attempt against it fails.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct DiscoveryServer {
    /// `127.0.0.1:<port>`, usable directly as a discovery name.
    pub host: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl DiscoveryServer {
    /// Request targets (path + query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `body` with `200 OK`.
pub fn start(body: &str) -> DiscoveryServer {
    start_with_status(200, body)
}

/// Serve `body` with the given status. Runs until the process exits.
pub fn start_with_status(status: u16, body: &str) -> DiscoveryServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body.as_bytes().to_vec());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, status, &body, &log));
        }
    });
    DiscoveryServer {
        host: format!("127.0.0.1:{}", port),
        requests,
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn handle(mut stream: TcpStream, status: u16, body: &[u8], log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    // A TLS ClientHello is not valid HTTP; just hang up.
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) if s.starts_with("GET ") => s,
        _ => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    log.lock().unwrap().push(path);

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}
