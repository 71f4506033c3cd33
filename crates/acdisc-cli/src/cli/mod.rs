//! CLI for acdisc discovery resolution.

mod commands;

use acdisc_core::config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_config, run_resolve, run_targets, ResolveArgs};

/// Top-level CLI for acdisc.
#[derive(Debug, Parser)]
#[command(name = "acdisc")]
#[command(about = "acdisc: resolve discovery documents over https, with opt-in http fallback", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the discovery document for a name.
    Resolve {
        /// Name to resolve, e.g. `example.com/myapp`.
        name: String,
        /// Allow falling back to plaintext http when https fails.
        #[arg(long)]
        insecure: bool,
        /// Write the document body to this file instead of stdout.
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
        /// Print a JSON summary instead of the body.
        #[arg(long)]
        json: bool,
    },

    /// Print the https and http targets that would be requested for a name.
    Targets {
        /// Name to build targets for.
        name: String,
    },

    /// Show the config file location and effective values.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve {
                name,
                insecure,
                output,
                json,
            } => {
                let args = ResolveArgs {
                    name,
                    insecure,
                    output,
                    json,
                };
                run_resolve(&cfg, args).await?
            }
            CliCommand::Targets { name } => run_targets(&name)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
