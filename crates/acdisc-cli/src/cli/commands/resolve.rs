//! `acdisc resolve <name>` – fetch a discovery document.

use acdisc_core::config::DiscoveryConfig;
use acdisc_core::{Resolution, Resolver};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ResolveArgs {
    pub name: String,
    pub insecure: bool,
    pub output: Option<PathBuf>,
    pub json: bool,
}

/// Machine-readable result printed with `--json`.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    target: &'a str,
    scheme: &'a str,
    status: u32,
    content_type: Option<&'a str>,
    bytes: usize,
}

pub async fn run_resolve(cfg: &DiscoveryConfig, args: ResolveArgs) -> Result<()> {
    let resolver = Resolver::from_config(cfg);
    let name = args.name.clone();
    let insecure = args.insecure;
    let resolution = tokio::task::spawn_blocking(move || resolver.resolve(&name, insecure))
        .await
        .context("resolve task join")?
        .with_context(|| format!("discovery failed for {}", args.name))?;

    if !resolution.is_secure() {
        eprintln!("warning: {} was fetched over insecure http", resolution.target);
    }

    let mut stdout = io::stdout().lock();
    emit(resolution, &args, &mut stdout)
}

/// Print the result and store or print the body, according to `args`.
fn emit(resolution: Resolution, args: &ResolveArgs, out: &mut impl Write) -> Result<()> {
    let Resolution {
        target,
        scheme,
        status,
        headers,
        body,
    } = resolution;
    let bytes = body.into_bytes().context("read discovery document")?;

    if let Some(path) = &args.output {
        write_body(path, &bytes)?;
    }

    if args.json {
        let summary = Summary {
            target: &target,
            scheme: scheme.as_str(),
            status,
            content_type: headers.content_type(),
            bytes: bytes.len(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    writeln!(out, "{}", target)?;
    if args.output.is_none() {
        out.write_all(&bytes)?;
        if !bytes.ends_with(b"\n") {
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_body(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    tracing::info!("wrote discovery document to {}", path.display());
    Ok(())
}
