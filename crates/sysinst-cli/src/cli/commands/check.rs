//! `sysinst check` – test a bundle, repository or feature against the blacklist.

use anyhow::{Context, Result};
use sysinst_core::blacklist::Blacklist;
use sysinst_core::config::InstallerConfig;

use super::blacklist_rules;
use crate::cli::CheckType;

pub fn run_check(
    cfg: &InstallerConfig,
    kind: CheckType,
    subject: &str,
    version: &str,
    extra_rules: &[String],
) -> Result<()> {
    let verdict = if is_blacklisted(cfg, kind, subject, version, extra_rules)? {
        "blacklisted"
    } else {
        "allowed"
    };
    println!("{verdict}");
    Ok(())
}

fn is_blacklisted(
    cfg: &InstallerConfig,
    kind: CheckType,
    subject: &str,
    version: &str,
    extra_rules: &[String],
) -> Result<bool> {
    let blacklist =
        Blacklist::new(blacklist_rules(cfg, extra_rules)).context("invalid blacklist rule")?;
    Ok(match kind {
        CheckType::Bundle => blacklist.is_bundle_blacklisted(subject),
        CheckType::Repository => blacklist.is_repository_blacklisted(subject),
        CheckType::Feature => blacklist.is_feature_blacklisted(subject, version),
    })
}
