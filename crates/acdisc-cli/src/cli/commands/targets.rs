//! `acdisc targets <name>` – show discovery targets without sending anything.

use acdisc_core::resolver::{discovery_target, Scheme};
use anyhow::Result;

pub fn run_targets(name: &str) -> Result<()> {
    for scheme in [Scheme::Https, Scheme::Http] {
        let target = discovery_target(scheme, name)?;
        let note = if scheme.is_secure() {
            ""
        } else {
            "  (only with --insecure)"
        };
        println!("{target}{note}");
    }
    Ok(())
}
