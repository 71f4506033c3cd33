//! CLI command handlers, one per file.

mod config;
mod resolve;
mod targets;

pub use config::run_config;
pub use resolve::{run_resolve, ResolveArgs};
pub use targets::run_targets;
