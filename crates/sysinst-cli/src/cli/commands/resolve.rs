//! `sysinst resolve` – print the install path of a locator.

use anyhow::Result;
use std::path::{Path, PathBuf};
use sysinst_core::config::InstallerConfig;
use sysinst_core::locator;

use super::system_directory;

pub fn run_resolve(
    cfg: &InstallerConfig,
    location: &str,
    system_dir: Option<&Path>,
) -> Result<()> {
    let path = resolve_path(cfg, location, system_dir)?;
    println!("{}", path.display());
    Ok(())
}

fn resolve_path(
    cfg: &InstallerConfig,
    location: &str,
    system_dir: Option<&Path>,
) -> Result<PathBuf> {
    let root = system_directory(cfg, system_dir)?;
    Ok(locator::resolve(&root, locator::normalize(location))?)
}
