//! Minimal HTTPS/1.1 server for redirect integration tests.
//!
//! An [`Authority`] owns a throwaway CA and one leaf certificate for
//! `127.0.0.1`/`localhost`. Every server it starts either redirects to a
//! fixed location or serves a fixed body, and records request targets.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::{ServerConfig, ServerConnection, StreamOwned};
use tempfile::NamedTempFile;

/// What every request to a server gets back.
#[derive(Clone)]
pub enum Reply {
    /// `200 OK` with this body.
    Body(String),
    /// `301 Moved Permanently` to this absolute location.
    Redirect(String),
}

pub struct Authority {
    config: Arc<ServerConfig>,
    ca_file: NamedTempFile,
}

impl Authority {
    pub fn new() -> Self {
        let ca_key = rcgen::KeyPair::generate().expect("ca key");
        let mut ca_params = rcgen::CertificateParams::new(Vec::<String>::new()).expect("ca params");
        ca_params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Unconstrained);
        ca_params
            .distinguished_name
            .push(rcgen::DnType::CommonName, "acdisc test CA");
        let ca_cert = ca_params.self_signed(&ca_key).expect("self-sign ca");

        let leaf_key = rcgen::KeyPair::generate().expect("leaf key");
        let mut leaf_params =
            rcgen::CertificateParams::new(vec!["127.0.0.1".to_string(), "localhost".to_string()])
                .expect("leaf params");
        leaf_params
            .distinguished_name
            .push(rcgen::DnType::CommonName, "127.0.0.1");
        let leaf_cert = leaf_params
            .signed_by(&leaf_key, &ca_cert, &ca_key)
            .expect("sign leaf");

        let mut ca_file = NamedTempFile::new().expect("ca file");
        ca_file.write_all(ca_cert.pem().as_bytes()).expect("write ca");
        ca_file.flush().expect("flush ca");

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ServerConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .expect("protocol versions")
            .with_no_client_auth()
            .with_single_cert(
                vec![CertificateDer::from(leaf_cert.der().to_vec())],
                PrivateKeyDer::Pkcs8(leaf_key.serialize_der().into()),
            )
            .expect("server config");

        Self {
            config: Arc::new(config),
            ca_file,
        }
    }

    /// PEM file clients must trust to talk to servers from this authority.
    pub fn ca_file(&self) -> &Path {
        self.ca_file.path()
    }

    /// Start a server answering every request with `reply`. Runs until the
    /// process exits.
    pub fn serve(&self, reply: Reply) -> TlsServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let config = Arc::clone(&self.config);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let config = Arc::clone(&config);
                let reply = reply.clone();
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, config, &reply, &log));
            }
        });
        TlsServer {
            host: format!("127.0.0.1:{}", port),
            requests,
        }
    }
}

impl Default for Authority {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TlsServer {
    /// `127.0.0.1:<port>`, usable directly as a discovery name.
    pub host: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TlsServer {
    /// Request targets (path + query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(stream: TcpStream, config: Arc<ServerConfig>, reply: &Reply, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let conn = match ServerConnection::new(config) {
        Ok(conn) => conn,
        Err(_) => return,
    };
    let mut tls = StreamOwned::new(conn, stream);

    // The first read drives the handshake; plaintext clients fail here.
    let mut buf = [0u8; 8192];
    let n = match tls.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
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

    let response = match reply {
        Reply::Body(body) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ),
        Reply::Redirect(location) => format!(
            "HTTP/1.1 301 Moved Permanently\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            location
        ),
    };
    let _ = tls.write_all(response.as_bytes());
    tls.conn.send_close_notify();
    let _ = tls.flush();
}
