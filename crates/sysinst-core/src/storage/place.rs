//! Copy-then-rename placement into the destination directory.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use super::error::PlacementError;
use super::{temp_prefix, TEMP_SUFFIX};

/// Creates the parent directory chain of `destination` and returns the parent.
/// Already-existing directories, including ones created concurrently by
/// another thread, are not an error.
pub fn ensure_parent(destination: &Path) -> Result<&Path, PlacementError> {
    let parent = match destination.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => {
            return Err(PlacementError::NoParent {
                path: destination.to_path_buf(),
            })
        }
    };
    fs::create_dir_all(parent).map_err(|source| PlacementError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;
    Ok(parent)
}

/// Copies `source` to `destination`, replacing any existing file atomically.
///
/// The copy lands in a `.part` sibling first; it is synced and then renamed
/// over `destination`. On failure the sibling is removed and `destination` is
/// untouched. `source` is left in place. Returns the number of bytes copied.
pub fn place_file(source: &Path, destination: &Path) -> Result<u64, PlacementError> {
    let parent = ensure_parent(destination)?;

    let prefix = temp_prefix(destination);
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(TEMP_SUFFIX);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Mode is still filtered through the process umask.
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut staged = builder
        .tempfile_in(parent)
        .map_err(|source| PlacementError::Stage {
            dir: parent.to_path_buf(),
            source,
        })?;

    let bytes = File::open(source)
        .and_then(|mut input| io::copy(&mut input, staged.as_file_mut()))
        .map_err(|e| PlacementError::Copy {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        })?;

    staged
        .as_file()
        .sync_all()
        .map_err(|source| PlacementError::Sync {
            path: staged.path().to_path_buf(),
            source,
        })?;

    staged
        .persist(destination)
        .map_err(|e| PlacementError::Persist {
            path: destination.to_path_buf(),
            source: e.error,
        })?;

    tracing::debug!(
        bytes,
        "placed {} from {}",
        destination.display(),
        source.display()
    );
    Ok(bytes)
}
