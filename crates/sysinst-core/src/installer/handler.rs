//! Completion handling for one fetched artifact: policy check, resolve, place.
//!
//! Runs on a blocking worker, possibly concurrently with handlers for other
//! fetches, including fetches of the same artifact. It holds no lock: the
//! `FetchResult` is owned by exactly one handler, and concurrent placements
//! of the same destination meet only at the atomic rename.

use std::path::PathBuf;
use std::sync::Arc;

use crate::blacklist::Blacklist;
use crate::downloader::FetchResult;
use crate::locator;
use crate::storage;

use super::error::InstallError;
use super::report::InstallOutcome;

#[derive(Debug, Clone)]
pub(crate) struct CompletionHandler {
    pub(crate) system_directory: PathBuf,
    pub(crate) blacklist: Arc<Blacklist>,
}

impl CompletionHandler {
    /// Consumes the fetch. The fetched temp file is removed on every path out
    /// of this function.
    pub(crate) fn on_fetched(&self, fetched: FetchResult) -> Result<InstallOutcome, InstallError> {
        let (uri, file) = fetched.into_parts();

        if self.blacklist.is_bundle_blacklisted(&uri) {
            tracing::warn!("refusing blacklisted bundle {}", uri);
            return Err(InstallError::ForbiddenArtifact { uri });
        }

        let path = locator::resolve(&self.system_directory, &uri)?;
        let bytes = storage::place_file(&file, &path)?;

        if let Err(e) = file.close() {
            tracing::warn!("could not remove fetched temp file for {}: {}", uri, e);
        }
        tracing::debug!(bytes, "installed {} at {}", uri, path.display());
        Ok(InstallOutcome::Installed { uri, path, bytes })
    }
}
