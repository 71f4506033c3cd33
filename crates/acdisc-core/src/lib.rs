pub mod config;
pub mod logging;

pub mod resolver;
pub mod transport;

pub use resolver::{Resolution, ResolveError, Resolver, Scheme};
pub use transport::{Body, Response, Transport, TransportError};
