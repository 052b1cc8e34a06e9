//! Tests for resolve, check and rejected invocations.

use super::parse;
use crate::cli::{CheckType, Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_resolve() {
    match parse(&["sysinst", "resolve", "mvn:org.foo/bar/1.0"]) {
        CliCommand::Resolve {
            locator,
            system_dir,
        } => {
            assert_eq!(locator, "mvn:org.foo/bar/1.0");
            assert!(system_dir.is_none());
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_system_dir() {
    match parse(&[
        "sysinst",
        "resolve",
        "mvn:org.foo/bar/1.0",
        "--system-dir",
        "assembly/system",
    ]) {
        CliCommand::Resolve { system_dir, .. } => {
            assert_eq!(system_dir.as_deref(), Some(Path::new("assembly/system")));
        }
        _ => panic!("expected Resolve with --system-dir"),
    }
}

#[test]
fn cli_parse_check() {
    match parse(&[
        "sysinst",
        "check",
        "mvn:org.foo/bar/1.0",
        "--blacklist",
        "mvn:org.foo",
    ]) {
        CliCommand::Check {
            subject,
            kind,
            version,
            blacklist,
        } => {
            assert_eq!(subject, "mvn:org.foo/bar/1.0");
            assert_eq!(kind, CheckType::Bundle);
            assert_eq!(version, "0.0.0");
            assert_eq!(blacklist, ["mvn:org.foo"]);
        }
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_check_feature() {
    match parse(&[
        "sysinst",
        "check",
        "camel-core",
        "--type",
        "feature",
        "--feature-version",
        "2.5.0",
    ]) {
        CliCommand::Check {
            subject,
            kind,
            version,
            ..
        } => {
            assert_eq!(subject, "camel-core");
            assert_eq!(kind, CheckType::Feature);
            assert_eq!(version, "2.5.0");
        }
        _ => panic!("expected Check with --type feature"),
    }
}

#[test]
fn cli_rejects_unknown_check_type() {
    assert!(Cli::try_parse_from(["sysinst", "check", "x", "--type", "plugin"]).is_err());
}

#[test]
fn cli_rejects_missing_arguments() {
    assert!(Cli::try_parse_from(["sysinst", "resolve"]).is_err());
    assert!(Cli::try_parse_from(["sysinst", "check"]).is_err());
    assert!(Cli::try_parse_from(["sysinst"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["sysinst", "add", "mvn:org.foo/bar/1.0"]).is_err());
}
