//! CLI command handlers, one file per subcommand.

mod check;
mod install;
mod resolve;

pub use check::run_check;
pub use install::{run_install, InstallArgs};
pub use resolve::run_resolve;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use sysinst_core::config::InstallerConfig;

/// The `--system-dir` override if given, else the configured directory; made absolute.
fn system_directory(cfg: &InstallerConfig, override_dir: Option<&Path>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => std::path::absolute(dir)
            .with_context(|| format!("cannot resolve system directory {}", dir.display())),
        None => cfg.absolute_system_directory(),
    }
}

/// Configured rules followed by the ones given on the command line.
fn blacklist_rules(cfg: &InstallerConfig, extra: &[String]) -> Vec<String> {
    cfg.blacklisted_rules
        .iter()
        .chain(extra)
        .cloned()
        .collect()
}
