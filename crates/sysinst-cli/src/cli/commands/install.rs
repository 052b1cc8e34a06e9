//! `sysinst install` – fetch artifacts into the system directory.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sysinst_core::config::InstallerConfig;
use sysinst_core::downloader::LocalRepoDownloader;
use sysinst_core::installer::{ArtifactInstaller, InstallReport};

use super::{blacklist_rules, system_directory};

#[derive(Debug, Default)]
pub struct InstallArgs {
    pub locators: Vec<String>,
    pub list: Option<PathBuf>,
    pub system_dir: Option<PathBuf>,
    pub blacklist: Vec<String>,
    pub repos: Vec<PathBuf>,
}

pub async fn run_install(cfg: &InstallerConfig, args: InstallArgs) -> Result<()> {
    let mut locators = args.locators;
    if let Some(list) = &args.list {
        locators.extend(read_locator_list(list)?);
    }
    if locators.is_empty() {
        bail!("nothing to install: pass locators or --list FILE");
    }

    let system_dir = system_directory(cfg, args.system_dir.as_deref())?;
    let repositories: Vec<PathBuf> = args
        .repos
        .into_iter()
        .chain(cfg.repositories.iter().cloned())
        .collect();
    let downloader = Arc::new(LocalRepoDownloader::new(repositories));
    for repo in downloader.repositories() {
        if !repo.is_dir() {
            tracing::warn!("repository {} is not a directory", repo.display());
        }
    }
    tracing::debug!(
        system_dir = %system_dir.display(),
        repositories = downloader.repositories().len(),
        "installing {} locator(s)",
        locators.len()
    );

    let installer = ArtifactInstaller::with_rules(
        &system_dir,
        downloader,
        blacklist_rules(cfg, &args.blacklist),
    )
    .context("invalid blacklist rule")?;

    match installer.install_all(&locators).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(failure) => {
            print_report(&failure.report);
            Err(failure.into())
        }
    }
}

fn print_report(report: &InstallReport) {
    for entry in report.entries() {
        println!("{entry}");
    }
}

fn read_locator_list(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read locator list {}", path.display()))?;
    Ok(parse_locator_list(&data))
}

/// One locator per line; blank lines and `#` comments are ignored.
fn parse_locator_list(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
