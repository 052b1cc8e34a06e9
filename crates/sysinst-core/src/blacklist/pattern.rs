//! Location patterns: globs over URIs, or component-wise Maven matches.

use regex::Regex;

use crate::locator::{MavenCoordinate, MAVEN_PREFIX};

use super::version::{Version, VersionRange};
use super::BlacklistError;

/// Compiles a glob where `*` matches any run of characters; everything else is literal.
pub(crate) fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let body: Vec<String> = glob.split('*').map(regex::escape).collect();
    Regex::new(&format!("^{}$", body.join(".*")))
}

/// A pattern matched against artifact locations.
///
/// `mvn:` patterns are compared component by component; components left out
/// of the pattern match anything. Other patterns are globs over the full URI.
#[derive(Debug, Clone)]
pub struct LocationPattern {
    original: String,
    kind: PatternKind,
}

#[derive(Debug, Clone)]
enum PatternKind {
    Glob(Regex),
    Maven(MavenPattern),
}

#[derive(Debug, Clone)]
struct MavenPattern {
    group_id: Regex,
    artifact_id: Option<Regex>,
    version: Option<VersionMatcher>,
    packaging: Option<Regex>,
    classifier: Option<Regex>,
}

#[derive(Debug, Clone)]
enum VersionMatcher {
    Range(VersionRange),
    Glob(Regex),
}

impl LocationPattern {
    pub fn new(pattern: &str) -> Result<Self, BlacklistError> {
        let compile = |glob: &str| {
            glob_to_regex(glob).map_err(|source| BlacklistError::Pattern {
                rule: pattern.to_string(),
                source,
            })
        };

        if let Some(body) = pattern.strip_prefix(MAVEN_PREFIX) {
            let coords = body.rsplit_once('!').map_or(body, |(_, c)| c);
            let segments: Vec<&str> = coords.split('/').collect();
            if segments.len() <= 5 && !segments[0].is_empty() {
                let optional = |idx: usize| -> Result<Option<Regex>, BlacklistError> {
                    match segments.get(idx).copied().filter(|s| !s.is_empty()) {
                        Some(s) => compile(s).map(Some),
                        None => Ok(None),
                    }
                };
                let version = match segments.get(2).copied().filter(|s| !s.is_empty()) {
                    Some(v) if v.starts_with('[') || v.starts_with('(') => {
                        let range = VersionRange::parse(v).map_err(|reason| {
                            BlacklistError::InvalidRange {
                                rule: pattern.to_string(),
                                reason,
                            }
                        })?;
                        Some(VersionMatcher::Range(range))
                    }
                    Some(v) => Some(VersionMatcher::Glob(compile(v)?)),
                    None => None,
                };
                return Ok(Self {
                    original: pattern.to_string(),
                    kind: PatternKind::Maven(MavenPattern {
                        group_id: compile(segments[0])?,
                        artifact_id: optional(1)?,
                        version,
                        packaging: optional(3)?,
                        classifier: optional(4)?,
                    }),
                });
            }
        }

        Ok(Self {
            original: pattern.to_string(),
            kind: PatternKind::Glob(compile(pattern)?),
        })
    }

    /// The pattern as written in the rule.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn matches(&self, location: &str) -> bool {
        match &self.kind {
            PatternKind::Glob(re) => re.is_match(location),
            PatternKind::Maven(pattern) => MavenCoordinate::parse(location)
                .map(|c| pattern.matches(&c))
                .unwrap_or(false),
        }
    }
}

impl MavenPattern {
    fn matches(&self, c: &MavenCoordinate) -> bool {
        let version_matches = match &self.version {
            None => true,
            Some(VersionMatcher::Glob(re)) => re.is_match(&c.version),
            Some(VersionMatcher::Range(range)) => {
                range.contains(&Version::from_maven(&c.version))
            }
        };
        self.group_id.is_match(&c.group_id)
            && component_matches(&self.artifact_id, &c.artifact_id)
            && version_matches
            && component_matches(&self.packaging, &c.packaging)
            && component_matches(&self.classifier, c.classifier.as_deref().unwrap_or(""))
    }
}

/// An omitted component matches anything.
fn component_matches(re: &Option<Regex>, value: &str) -> bool {
    re.as_ref().map_or(true, |re| re.is_match(value))
}
