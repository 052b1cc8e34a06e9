//! Blacklist policy applied to fetched artifacts before they are installed.
//!
//! Built once from an ordered list of rule strings and read-only afterwards,
//! so a single `Arc<Blacklist>` is shared by every completion handler without
//! locking.
//!
//! Rule form is `name;type=bundle|feature|repository;range=...`:
//! - without `type`, a `mvn:` name is a bundle rule (a repository rule if it
//!   points at `/xml/features`), a URL-like name is a bundle rule, and
//!   anything else names a feature;
//! - bundle and repository names are [`LocationPattern`]s;
//! - feature names are globs, optionally limited by a version `range`.
//!
//! Only bundle rules veto installs. Repository and feature rules are kept for
//! [`Blacklist::is_repository_blacklisted`] and
//! [`Blacklist::is_feature_blacklisted`]; building a blacklist that contains
//! them logs a warning.

mod clause;
mod pattern;
mod version;

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

use crate::locator::MAVEN_PREFIX;

pub use clause::Clause;
pub use pattern::LocationPattern;
pub use version::{Version, VersionRange};

#[derive(Debug, Error)]
pub enum BlacklistError {
    #[error("blacklist rule {rule:?}: invalid version range: {reason}")]
    InvalidRange { rule: String, reason: String },

    #[error("blacklist rule {rule:?}: unknown type {kind:?}")]
    UnknownType { rule: String, kind: String },

    #[error("blacklist rule {rule:?}: {source}")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
}

/// What a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    Bundle,
    Feature,
    Repository,
}

impl FromStr for RuleType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bundle" => Ok(RuleType::Bundle),
            "feature" => Ok(RuleType::Feature),
            "repository" => Ok(RuleType::Repository),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuleType::Bundle => "bundle",
            RuleType::Feature => "feature",
            RuleType::Repository => "repository",
        })
    }
}

impl RuleType {
    /// Type assumed for a rule that does not declare one.
    fn infer(name: &str) -> Self {
        if name.starts_with(MAVEN_PREFIX) {
            if name.contains("/xml/features") {
                RuleType::Repository
            } else {
                RuleType::Bundle
            }
        } else if name.contains(":/") {
            RuleType::Bundle
        } else {
            RuleType::Feature
        }
    }
}

#[derive(Debug, Clone)]
struct FeaturePattern {
    name: Regex,
    range: Option<VersionRange>,
}

impl FeaturePattern {
    fn matches(&self, name: &str, version: &str) -> bool {
        self.name.is_match(name)
            && self
                .range
                .as_ref()
                .map_or(true, |r| r.contains(&Version::from_maven(version)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    bundles: Vec<LocationPattern>,
    repositories: Vec<LocationPattern>,
    features: Vec<FeaturePattern>,
}

impl Blacklist {
    /// Builds the policy. Blank rules are ignored; malformed ones are errors.
    pub fn new<I, S>(rules: I) -> Result<Self, BlacklistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut blacklist = Blacklist::default();
        for rule in rules {
            let rule = rule.as_ref();
            let Some(clause) = Clause::parse(rule) else {
                continue;
            };
            let kind = match clause.attribute("type") {
                Some(t) => t.parse::<RuleType>().map_err(|()| BlacklistError::UnknownType {
                    rule: rule.to_string(),
                    kind: t.to_string(),
                })?,
                None => RuleType::infer(&clause.name),
            };
            if kind != RuleType::Bundle {
                tracing::warn!(
                    "blacklist rule {:?} is a {} rule and does not veto bundle installs",
                    rule,
                    kind
                );
            }
            match kind {
                RuleType::Bundle => {
                    let pattern = LocationPattern::new(&clause.name)?;
                    tracing::debug!("bundle rule {}", pattern.as_str());
                    blacklist.bundles.push(pattern);
                }
                RuleType::Repository => blacklist
                    .repositories
                    .push(LocationPattern::new(&clause.name)?),
                RuleType::Feature => {
                    let name = pattern::glob_to_regex(&clause.name).map_err(|source| {
                        BlacklistError::Pattern {
                            rule: rule.to_string(),
                            source,
                        }
                    })?;
                    let range = clause
                        .attribute("range")
                        .map(VersionRange::parse)
                        .transpose()
                        .map_err(|reason| BlacklistError::InvalidRange {
                            rule: rule.to_string(),
                            reason,
                        })?;
                    blacklist.features.push(FeaturePattern { name, range });
                }
            }
        }
        tracing::debug!(
            bundles = blacklist.bundles.len(),
            repositories = blacklist.repositories.len(),
            features = blacklist.features.len(),
            "blacklist built"
        );
        Ok(blacklist)
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty() && self.repositories.is_empty() && self.features.is_empty()
    }

    /// True if installing the bundle at `uri` is forbidden.
    pub fn is_bundle_blacklisted(&self, uri: &str) -> bool {
        self.bundles.iter().any(|p| p.matches(uri))
    }

    /// True if loading the features repository at `uri` is forbidden.
    pub fn is_repository_blacklisted(&self, uri: &str) -> bool {
        self.repositories.iter().any(|p| p.matches(uri))
    }

    pub fn is_feature_blacklisted(&self, name: &str, version: &str) -> bool {
        self.features.iter().any(|p| p.matches(name, version))
    }
}
