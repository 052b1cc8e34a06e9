//! Artifact locators: normalization and resolution to system-directory paths.
//!
//! A locator is either a Maven coordinate (`mvn:group/artifact/version/...`)
//! or a generic URL / path string. Resolution is pure: no filesystem access.

mod maven;
mod strip;

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

pub use maven::{MavenCoordinate, DEFAULT_TYPE, DEFAULT_VERSION};
pub use strip::strip_url;

/// Scheme prefix of Maven coordinates.
pub const MAVEN_PREFIX: &str = "mvn:";

/// Scheme prefix of already-absolute local references.
pub const FILE_PREFIX: &str = "file:";

/// A locator that cannot be turned into a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed locator {location}: {reason}")]
pub struct MalformedLocator {
    pub location: String,
    pub reason: String,
}

impl MalformedLocator {
    pub fn new(location: &str, reason: impl Into<String>) -> Self {
        Self {
            location: location.to_string(),
            reason: reason.into(),
        }
    }
}

/// True if `location` is a Maven coordinate.
pub fn is_maven(location: &str) -> bool {
    location.starts_with(MAVEN_PREFIX)
}

/// Normalizes a requested locator before it is handed to a downloader.
///
/// Unwraps annotation prefixes (see [`strip_url`]) and, for Maven locators,
/// drops exactly one trailing `/` left behind by badly formed upstream
/// metadata (`mvn:org.foo/bar/1.0/` → `mvn:org.foo/bar/1.0`).
pub fn normalize(location: &str) -> &str {
    let stripped = strip_url(location);
    if is_maven(stripped) {
        stripped.strip_suffix('/').unwrap_or(stripped)
    } else {
        stripped
    }
}

/// Maps a locator to its destination under `root`.
///
/// - `file:` URLs resolve to their own local path; `root` is ignored.
/// - `mvn:` coordinates resolve to the repository layout below `root`.
/// - Anything else is joined onto `root` as a relative path. Absolute paths
///   and `..` components are rejected so the result stays below `root`.
pub fn resolve(root: &Path, location: &str) -> Result<PathBuf, MalformedLocator> {
    if location.starts_with(FILE_PREFIX) {
        let url = url::Url::parse(location)
            .map_err(|e| MalformedLocator::new(location, e.to_string()))?;
        return url
            .to_file_path()
            .map_err(|()| MalformedLocator::new(location, "not a local file path"));
    }
    if is_maven(location) {
        let coordinate = MavenCoordinate::parse(location)?;
        return Ok(root.join(coordinate.layout_path()));
    }
    let relative = Path::new(location);
    if let Some(bad) = relative
        .components()
        .find(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        let reason = match bad {
            Component::ParentDir => "parent directory component",
            _ => "absolute path",
        };
        return Err(MalformedLocator::new(location, reason));
    }
    Ok(root.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_one_trailing_slash() {
        assert_eq!(normalize("mvn:org.foo/bar/1.0/"), "mvn:org.foo/bar/1.0");
        assert_eq!(normalize("mvn:org.foo/bar/1.0//"), "mvn:org.foo/bar/1.0/");
        assert_eq!(
            normalize("mvn:org.foo/bar/1.0/"),
            normalize("mvn:org.foo/bar/1.0")
        );
    }

    #[test]
    fn normalize_leaves_non_maven_trailing_slash() {
        assert_eq!(normalize("file:/opt/repo/"), "file:/opt/repo/");
        assert_eq!(normalize("http://example.com/a/"), "http://example.com/a/");
    }

    #[test]
    fn normalize_unwraps_before_trimming() {
        assert_eq!(
            normalize("wrap:mvn:org.foo/bar/1.0/$Bundle-SymbolicName=bar"),
            "mvn:org.foo/bar/1.0"
        );
    }

    #[test]
    fn resolve_maven_uses_repository_layout() {
        let root = Path::new("/srv/system");
        let path = resolve(root, "mvn:org.foo/bar/1.0").unwrap();
        assert_eq!(path, Path::new("/srv/system/org/foo/bar/1.0/bar-1.0.jar"));

        let path = resolve(root, "mvn:org.foo/bar/1.0/xml/features").unwrap();
        assert_eq!(
            path,
            Path::new("/srv/system/org/foo/bar/1.0/bar-1.0-features.xml")
        );
    }

    #[test]
    fn resolve_is_deterministic() {
        let root = Path::new("/srv/system");
        let first = resolve(root, "mvn:org.foo/bar/1.0/war/web").unwrap();
        for _ in 0..10 {
            assert_eq!(resolve(root, "mvn:org.foo/bar/1.0/war/web").unwrap(), first);
        }
    }

    #[test]
    fn resolve_distinct_coordinates_do_not_collide() {
        let root = Path::new("/srv/system");
        let plain = resolve(root, "mvn:org.foo/bar/1.0").unwrap();
        let classified = resolve(root, "mvn:org.foo/bar/1.0/jar/tests").unwrap();
        let other_group = resolve(root, "mvn:org/foo.bar/1.0").unwrap();
        assert_ne!(plain, classified);
        assert_ne!(plain, other_group);
    }

    #[cfg(unix)]
    #[test]
    fn resolve_file_url_ignores_root() {
        let path = resolve(Path::new("/srv/system"), "file:/opt/bundles/a.jar").unwrap();
        assert_eq!(path, Path::new("/opt/bundles/a.jar"));
    }

    #[test]
    fn resolve_plain_string_is_relative_to_root() {
        let path = resolve(Path::new("/srv/system"), "org/foo/custom.jar").unwrap();
        assert_eq!(path, Path::new("/srv/system/org/foo/custom.jar"));
    }

    #[test]
    fn resolve_plain_string_stays_below_root() {
        let root = Path::new("/srv/system");
        let err = resolve(root, "/etc/evil.jar").unwrap_err();
        assert_eq!(err.reason, "absolute path");
        let err = resolve(root, "org/../../etc/evil.jar").unwrap_err();
        assert_eq!(err.reason, "parent directory component");
        assert_eq!(
            resolve(root, "./org/a.jar").unwrap(),
            Path::new("/srv/system/./org/a.jar")
        );
    }

    #[test]
    fn resolve_rejects_malformed_maven() {
        let err = resolve(Path::new("/srv"), "mvn:onlygroup").unwrap_err();
        assert_eq!(err.location, "mvn:onlygroup");
        assert!(resolve(Path::new("/srv"), "mvn:a/b/1/jar/c/extra").is_err());
        assert!(resolve(Path::new("/srv"), "mvn:org.foo/../1.0").is_err());
    }

    #[test]
    fn is_maven_checks_prefix() {
        assert!(is_maven("mvn:a/b/1"));
        assert!(!is_maven("file:/tmp/a.jar"));
        assert!(!is_maven("wrap:mvn:a/b/1"));
    }
}
