//! Per-locator install failures.

use thiserror::Error;

use crate::downloader::FetchError;
use crate::locator::MalformedLocator;
use crate::storage::PlacementError;

/// Why a single locator was not installed. Never aborts the rest of a batch.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    MalformedLocator(#[from] MalformedLocator),

    /// The blacklist vetoed the fetched URI; nothing was written.
    #[error("bundle {uri} is blacklisted")]
    ForbiddenArtifact { uri: String },

    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    /// Directory creation, copy or rename failed. Not retried.
    #[error("install failed: {0}")]
    Io(#[from] PlacementError),

    /// The install task panicked or was cancelled.
    #[error("install of {location} aborted: {reason}")]
    Aborted { location: String, reason: String },
}

impl InstallError {
    /// Short stable name of the failure kind, for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            InstallError::MalformedLocator(_) => "malformed-locator",
            InstallError::ForbiddenArtifact { .. } => "forbidden-artifact",
            InstallError::FetchFailed(_) => "fetch-failed",
            InstallError::Io(_) => "io-error",
            InstallError::Aborted { .. } => "aborted",
        }
    }
}
