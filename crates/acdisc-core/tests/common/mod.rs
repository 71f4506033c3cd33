#![allow(dead_code)]

pub mod discovery_server;
pub mod tls_server;
