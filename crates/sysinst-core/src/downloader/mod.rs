//! Downloader abstraction consumed by the installer.
//!
//! A [`Downloader`] turns a locator into a future that resolves once the
//! artifact bytes sit in a local temporary file. Network access, caching and
//! retry live behind this trait; the installer only sees the [`FetchResult`].

mod local;

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use tempfile::TempPath;
use thiserror::Error;

pub use local::LocalRepoDownloader;

/// Future returned by [`Downloader::download`]. Owns everything it needs, so
/// it can be spawned onto any runtime worker.
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<FetchResult, FetchError>> + Send + 'static>>;

/// Fetches artifacts on behalf of the installer.
///
/// Implementations decide their own concurrency; the installer may hold many
/// returned futures at once and polls them from several worker threads.
pub trait Downloader: Send + Sync {
    fn download(&self, location: &str) -> FetchFuture;
}

impl<D: Downloader + ?Sized> Downloader for Arc<D> {
    fn download(&self, location: &str) -> FetchFuture {
        (**self).download(location)
    }
}

/// A completed fetch: the URI that was actually resolved and the temporary
/// file holding its bytes. The file is deleted when the result is dropped.
#[derive(Debug)]
pub struct FetchResult {
    url: String,
    file: TempPath,
}

impl FetchResult {
    pub fn new(url: impl Into<String>, file: TempPath) -> Self {
        Self {
            url: url.into(),
            file,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Local path of the fetched bytes.
    pub fn path(&self) -> &Path {
        &self.file
    }

    pub fn into_parts(self) -> (String, TempPath) {
        (self.url, self.file)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("artifact not found: {location}")]
    NotFound { location: String },

    #[error("i/o error fetching {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("fetching {location} failed: {reason}")]
    Failed { location: String, reason: String },
}

impl FetchError {
    pub fn location(&self) -> &str {
        match self {
            FetchError::NotFound { location }
            | FetchError::Io { location, .. }
            | FetchError::Failed { location, .. } => location,
        }
    }
}
