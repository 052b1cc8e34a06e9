//! Install coordinator: normalize → fetch → blacklist check → resolve → place.
//!
//! Each requested locator becomes one task in a `JoinSet`. The task awaits the
//! downloader's future, then hands the `FetchResult` to a blocking worker that
//! runs the completion handler. Outcomes are collected per locator; one
//! failing or forbidden artifact never stops the others.

mod error;
mod handler;
mod report;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::blacklist::{Blacklist, BlacklistError};
use crate::downloader::Downloader;
use crate::locator::{self, MavenCoordinate};

pub use error::InstallError;
pub use report::{ArtifactReport, InstallFailure, InstallOutcome, InstallReport};

use handler::CompletionHandler;

/// Installs artifacts into a system directory. Cheap to clone; clones share
/// the downloader and blacklist.
#[derive(Clone)]
pub struct ArtifactInstaller {
    system_directory: PathBuf,
    downloader: Arc<dyn Downloader>,
    blacklist: Arc<Blacklist>,
}

impl ArtifactInstaller {
    pub fn new(
        system_directory: impl Into<PathBuf>,
        downloader: Arc<dyn Downloader>,
        blacklist: Blacklist,
    ) -> Self {
        Self {
            system_directory: system_directory.into(),
            downloader,
            blacklist: Arc::new(blacklist),
        }
    }

    /// Builds the blacklist from `rules` and the installer around it.
    pub fn with_rules<I, S>(
        system_directory: impl Into<PathBuf>,
        downloader: Arc<dyn Downloader>,
        rules: I,
    ) -> Result<Self, BlacklistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(system_directory, downloader, Blacklist::new(rules)?))
    }

    /// Installs a single locator.
    ///
    /// Non-Maven locators are skipped with a warning and no filesystem
    /// access. Must be called from within a tokio runtime.
    pub async fn install_artifact(&self, location: &str) -> Result<InstallOutcome, InstallError> {
        tracing::info!("adding maven artifact: {}", location);
        let normalized = locator::normalize(location);
        if !locator::is_maven(normalized) {
            tracing::warn!("ignoring non maven artifact {}", normalized);
            return Ok(InstallOutcome::Skipped {
                location: normalized.to_string(),
            });
        }
        MavenCoordinate::parse(normalized)?;

        let fetched = self.downloader.download(normalized).await?;

        let handler = CompletionHandler {
            system_directory: self.system_directory.clone(),
            blacklist: Arc::clone(&self.blacklist),
        };
        tokio::task::spawn_blocking(move || handler.on_fetched(fetched))
            .await
            .map_err(|e| InstallError::Aborted {
                location: normalized.to_string(),
                reason: format!("placement task join: {e}"),
            })?
    }

    /// Installs every locator concurrently and waits for all of them.
    ///
    /// Returns the full report, in request order, when nothing failed; and
    /// [`InstallFailure`] carrying the same report otherwise.
    pub async fn install_all<I, S>(&self, locations: I) -> Result<InstallReport, InstallFailure>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pending: HashMap<usize, String> = HashMap::new();
        let mut join_set = JoinSet::new();

        for (index, location) in locations.into_iter().enumerate() {
            let location = location.as_ref().to_string();
            pending.insert(index, location.clone());
            let installer = self.clone();
            join_set.spawn(async move {
                let result = installer.install_artifact(&location).await;
                (index, result)
            });
        }

        let mut entries = Vec::with_capacity(pending.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    if let Err(e) = &result {
                        tracing::warn!("artifact #{} failed: {}", index, e);
                    }
                    if let Some(location) = pending.remove(&index) {
                        entries.push((index, location, result));
                    }
                }
                Err(e) => tracing::error!("install task join: {}", e),
            }
        }

        // Tasks that panicked never reported back.
        for (index, location) in pending {
            let error = InstallError::Aborted {
                location: location.clone(),
                reason: "install task did not complete".to_string(),
            };
            entries.push((index, location, Err(error)));
        }

        let report = InstallReport::from_indexed(entries);
        tracing::info!(
            installed = report.installed().count(),
            skipped = report.skipped().count(),
            failed = report.failures().count(),
            "install run finished"
        );
        report.into_result()
    }
}
