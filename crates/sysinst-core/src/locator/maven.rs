//! Maven coordinate parsing and repository layout.

use std::fmt;
use std::path::PathBuf;

use super::{MalformedLocator, MAVEN_PREFIX};

/// Version used when a coordinate leaves it out.
pub const DEFAULT_VERSION: &str = "LATEST";

/// Packaging type used when a coordinate leaves it out.
pub const DEFAULT_TYPE: &str = "jar";

/// A parsed `mvn:[repository!]group/artifact[/version[/type[/classifier]]]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenCoordinate {
    /// Repository URL given before `!`, if any. Not part of the layout path.
    pub repository: Option<String>,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    pub classifier: Option<String>,
}

impl MavenCoordinate {
    /// Parses a Maven locator. Empty version/type/classifier segments take
    /// their defaults, so a trailing `/` is tolerated.
    pub fn parse(location: &str) -> Result<Self, MalformedLocator> {
        let body = location
            .strip_prefix(MAVEN_PREFIX)
            .ok_or_else(|| MalformedLocator::new(location, "missing mvn: prefix"))?;

        let (repository, coords) = match body.rfind('!') {
            Some(idx) => (Some(body[..idx].to_string()), &body[idx + 1..]),
            None => (None, body),
        };

        let segments: Vec<&str> = coords.split('/').collect();
        if segments.len() < 2 {
            return Err(MalformedLocator::new(
                location,
                "expected at least groupId/artifactId",
            ));
        }
        if segments.len() > 5 {
            return Err(MalformedLocator::new(
                location,
                "expected groupId/artifactId[/version[/type[/classifier]]]",
            ));
        }
        if segments.iter().any(|s| *s == "." || *s == "..") {
            return Err(MalformedLocator::new(location, "relative path segment"));
        }

        let group_id = segments[0];
        if group_id.is_empty() || group_id.split('.').any(str::is_empty) {
            return Err(MalformedLocator::new(location, "empty groupId component"));
        }
        let artifact_id = segments[1];
        if artifact_id.is_empty() {
            return Err(MalformedLocator::new(location, "empty artifactId"));
        }

        let segment = |idx: usize| {
            segments
                .get(idx)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        Ok(Self {
            repository,
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: segment(2).unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            packaging: segment(3).unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            classifier: segment(4),
        })
    }

    /// File name inside the version directory: `artifact-version[-classifier].type`.
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, classifier, self.packaging
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.packaging),
        }
    }

    /// Relative repository-layout path, e.g. `org/foo/bar/1.0/bar-1.0.jar`.
    pub fn layout_path(&self) -> PathBuf {
        let mut path: PathBuf = self.group_id.split('.').collect();
        path.push(&self.artifact_id);
        path.push(&self.version);
        path.push(self.file_name());
        path
    }
}

impl fmt::Display for MavenCoordinate {
    /// Canonical form: type and classifier are only written when they carry information.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", MAVEN_PREFIX)?;
        if let Some(repository) = &self.repository {
            write!(f, "{}!", repository)?;
        }
        write!(f, "{}/{}/{}", self.group_id, self.artifact_id, self.version)?;
        if self.packaging != DEFAULT_TYPE || self.classifier.is_some() {
            write!(f, "/{}", self.packaging)?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, "/{}", classifier)?;
        }
        Ok(())
    }
}
