//! CLI for the sysinst artifact installer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use sysinst_core::config;

use commands::{run_check, run_install, run_resolve, InstallArgs};

/// Top-level CLI for the sysinst artifact installer.
#[derive(Debug, Parser)]
#[command(name = "sysinst")]
#[command(about = "sysinst: install Maven artifacts into a provisioning system directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch artifacts and place them in the system directory.
    Install {
        /// Artifact locators, e.g. `mvn:org.foo/bar/1.0`.
        locators: Vec<String>,

        /// Read additional locators from a file, one per line (`#` starts a comment).
        #[arg(long, value_name = "FILE")]
        list: Option<PathBuf>,

        /// Install into DIR instead of the configured system directory.
        #[arg(long, value_name = "DIR")]
        system_dir: Option<PathBuf>,

        /// Extra blacklist rule, added to the configured ones. Repeatable.
        #[arg(long = "blacklist", value_name = "RULE")]
        blacklist: Vec<String>,

        /// Local Maven repository searched before the configured ones. Repeatable.
        #[arg(long = "repo", value_name = "DIR")]
        repos: Vec<PathBuf>,
    },

    /// Print where a locator would be installed.
    Resolve {
        /// Artifact locator.
        locator: String,

        /// Resolve against DIR instead of the configured system directory.
        #[arg(long, value_name = "DIR")]
        system_dir: Option<PathBuf>,
    },

    /// Report whether a bundle, features repository or feature is blacklisted.
    Check {
        /// Bundle or repository URI (e.g. `mvn:org.foo/bar/1.0`), or a feature name.
        subject: String,

        /// Which rules to check against.
        #[arg(long = "type", value_enum, default_value_t = CheckType::Bundle)]
        kind: CheckType,

        /// Feature version matched against `range` attributes (with `--type feature`).
        #[arg(long = "feature-version", value_name = "VERSION", default_value = "0.0.0")]
        version: String,

        /// Extra blacklist rule, added to the configured ones. Repeatable.
        #[arg(long = "blacklist", value_name = "RULE")]
        blacklist: Vec<String>,
    },
}

/// Rule kind consulted by `sysinst check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckType {
    Bundle,
    Repository,
    Feature,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Install {
                locators,
                list,
                system_dir,
                blacklist,
                repos,
            } => {
                let args = InstallArgs {
                    locators,
                    list,
                    system_dir,
                    blacklist,
                    repos,
                };
                run_install(&cfg, args).await?;
            }
            CliCommand::Resolve {
                locator,
                system_dir,
            } => run_resolve(&cfg, &locator, system_dir.as_deref())?,
            CliCommand::Check {
                subject,
                kind,
                version,
                blacklist,
            } => run_check(&cfg, kind, &subject, &version, &blacklist)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
