//! Placement failures. Each variant carries the path it was working on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("destination {} has no parent directory", .path.display())]
    NoParent { path: PathBuf },

    #[error("failed to create directory {}: {}", .path.display(), .source)]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to stage temp file in {}: {}", .dir.display(), .source)]
    Stage { dir: PathBuf, source: io::Error },

    #[error("failed to copy {} to {}: {}", .from.display(), .to.display(), .source)]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("failed to sync {}: {}", .path.display(), .source)]
    Sync { path: PathBuf, source: io::Error },

    #[error("failed to rename into {}: {}", .path.display(), .source)]
    Persist { path: PathBuf, source: io::Error },
}
