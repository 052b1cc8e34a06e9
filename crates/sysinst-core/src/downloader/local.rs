//! Downloader backed by local Maven-layout repositories.
//!
//! Looks a coordinate up in each configured repository directory in order and
//! copies the first hit into a fresh temp file. `file:` locations are copied
//! directly. Anything else is reported as unsupported.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::NamedTempFile;

use crate::locator::{self, MavenCoordinate, FILE_PREFIX};

use super::{Downloader, FetchError, FetchFuture, FetchResult};

#[derive(Debug, Clone)]
pub struct LocalRepoDownloader {
    repositories: Arc<[PathBuf]>,
    scratch_dir: Option<PathBuf>,
}

impl LocalRepoDownloader {
    pub fn new(repositories: Vec<PathBuf>) -> Self {
        Self {
            repositories: repositories.into(),
            scratch_dir: None,
        }
    }

    /// Directory for fetched temp files (default: the system temp dir).
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn repositories(&self) -> &[PathBuf] {
        &self.repositories
    }

    /// Finds the file backing `location`.
    fn locate(&self, location: &str) -> Result<PathBuf, FetchError> {
        if location.starts_with(FILE_PREFIX) {
            let path = locator::resolve(&PathBuf::new(), location).map_err(|e| {
                FetchError::Failed {
                    location: location.to_string(),
                    reason: e.reason,
                }
            })?;
            return if path.is_file() {
                Ok(path)
            } else {
                Err(FetchError::NotFound {
                    location: location.to_string(),
                })
            };
        }

        if !locator::is_maven(location) {
            return Err(FetchError::Failed {
                location: location.to_string(),
                reason: "unsupported scheme".to_string(),
            });
        }

        let coordinate = MavenCoordinate::parse(location).map_err(|e| FetchError::Failed {
            location: location.to_string(),
            reason: e.reason,
        })?;
        let relative = coordinate.layout_path();
        self.repositories
            .iter()
            .map(|repo| repo.join(&relative))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| FetchError::NotFound {
                location: location.to_string(),
            })
    }

    fn fetch_blocking(&self, location: &str) -> Result<FetchResult, FetchError> {
        let source = self.locate(location)?;
        let io_err = |source: io::Error| FetchError::Io {
            location: location.to_string(),
            source,
        };

        let mut temp = match &self.scratch_dir {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(io_err)?;
        let mut input = File::open(&source).map_err(io_err)?;
        let bytes = io::copy(&mut input, temp.as_file_mut()).map_err(io_err)?;

        tracing::debug!(bytes, "fetched {} from {}", location, source.display());
        Ok(FetchResult::new(location, temp.into_temp_path()))
    }
}

impl Downloader for LocalRepoDownloader {
    fn download(&self, location: &str) -> FetchFuture {
        let this = self.clone();
        let location = location.to_string();
        Box::pin(async move {
            let join_location = location.clone();
            tokio::task::spawn_blocking(move || this.fetch_blocking(&location))
                .await
                .map_err(|e| FetchError::Failed {
                    location: join_location,
                    reason: format!("fetch task join: {e}"),
                })?
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn repo_with(dir: &std::path::Path, relative: &str, bytes: &[u8]) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    #[tokio::test]
    async fn fetches_from_first_matching_repository() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        repo_with(second.path(), "org/foo/bar/1.0/bar-1.0.jar", b"second");

        let downloader =
            LocalRepoDownloader::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        let fetched = downloader.download("mvn:org.foo/bar/1.0").await.unwrap();
        assert_eq!(fetched.url(), "mvn:org.foo/bar/1.0");
        assert_eq!(fs::read(fetched.path()).unwrap(), b"second");

        repo_with(first.path(), "org/foo/bar/1.0/bar-1.0.jar", b"first");
        let fetched = downloader.download("mvn:org.foo/bar/1.0").await.unwrap();
        assert_eq!(fs::read(fetched.path()).unwrap(), b"first");
    }

    #[tokio::test]
    async fn temp_file_removed_on_drop() {
        let repo = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        repo_with(repo.path(), "org/foo/bar/1.0/bar-1.0.jar", b"x");

        let downloader = LocalRepoDownloader::new(vec![repo.path().to_path_buf()])
            .with_scratch_dir(scratch.path());
        let fetched = downloader.download("mvn:org.foo/bar/1.0").await.unwrap();
        let temp = fetched.path().to_path_buf();
        assert!(temp.starts_with(scratch.path()));
        assert!(temp.exists());
        drop(fetched);
        assert!(!temp.exists());
    }

    #[tokio::test]
    async fn missing_artifact_is_not_found() {
        let repo = tempfile::tempdir().unwrap();
        let downloader = LocalRepoDownloader::new(vec![repo.path().to_path_buf()]);
        let err = downloader.download("mvn:org.foo/none/1.0").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
        assert_eq!(err.location(), "mvn:org.foo/none/1.0");
    }

    #[tokio::test]
    async fn unsupported_scheme() {
        let downloader = LocalRepoDownloader::new(Vec::new());
        let err = downloader.download("http://example.com/a.jar").await.unwrap_err();
        assert!(matches!(err, FetchError::Failed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_location_is_copied() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.jar");
        fs::write(&src, b"local").unwrap();
        let url = format!("file:{}", src.display());

        let fetched = LocalRepoDownloader::new(Vec::new()).download(&url).await.unwrap();
        assert_eq!(fs::read(fetched.path()).unwrap(), b"local");
        assert!(src.exists());
    }
}
