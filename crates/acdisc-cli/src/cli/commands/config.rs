//! `acdisc config` – show config path and effective values.

use acdisc_core::config::{self, DiscoveryConfig};
use anyhow::Result;

pub fn run_config(cfg: &DiscoveryConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
