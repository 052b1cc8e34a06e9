//! Batch results: one entry per requested locator, in request order.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::error::InstallError;

/// Successful result of installing one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The artifact fetched from `uri` now lives at `path`.
    Installed { uri: String, path: PathBuf, bytes: u64 },
    /// Not a Maven locator; nothing was fetched or written.
    Skipped { location: String },
}

#[derive(Debug)]
pub struct ArtifactReport {
    location: String,
    result: Result<InstallOutcome, InstallError>,
}

impl ArtifactReport {
    /// The locator as it was requested, before normalization.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn error(&self) -> Option<&InstallError> {
        self.result.as_ref().err()
    }

    pub fn is_installed(&self) -> bool {
        matches!(self.result, Ok(InstallOutcome::Installed { .. }))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.result, Ok(InstallOutcome::Skipped { .. }))
    }
}

impl fmt::Display for ArtifactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(InstallOutcome::Installed { path, .. }) => {
                write!(f, "installed {} -> {}", self.location, path.display())
            }
            Ok(InstallOutcome::Skipped { .. }) => write!(f, "skipped   {}", self.location),
            Err(e) => write!(f, "failed    {} [{}]: {}", self.location, e.kind(), e),
        }
    }
}

#[derive(Debug, Default)]
pub struct InstallReport {
    entries: Vec<ArtifactReport>,
}

impl InstallReport {
    /// Builds a report from `(request index, location, result)` triples.
    pub(crate) fn from_indexed(
        mut entries: Vec<(usize, String, Result<InstallOutcome, InstallError>)>,
    ) -> Self {
        entries.sort_by_key(|(index, _, _)| *index);
        Self {
            entries: entries
                .into_iter()
                .map(|(_, location, result)| ArtifactReport { location, result })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[ArtifactReport] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn installed(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.entries.iter().filter(|e| e.is_installed())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.entries.iter().filter(|e| e.is_skipped())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.entries.iter().filter(|e| e.result.is_err())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// `Ok(self)` if nothing failed, otherwise the report wrapped in an [`InstallFailure`].
    pub fn into_result(self) -> Result<Self, InstallFailure> {
        if self.has_failures() {
            Err(InstallFailure { report: self })
        } else {
            Ok(self)
        }
    }
}

/// At least one locator in a batch failed. The full report is kept so the
/// caller can still see what was installed and skipped.
#[derive(Debug, Error)]
#[error("{} of {} artifact(s) failed to install", .report.failures().count(), .report.len())]
pub struct InstallFailure {
    pub report: InstallReport,
}
