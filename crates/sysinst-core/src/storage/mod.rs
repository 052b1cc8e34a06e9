//! Disk placement of fetched artifacts.
//!
//! Bytes are copied into a uniquely named `.part` sibling of the destination,
//! synced, and renamed over the final name. A reader checking the final path
//! sees either the previous complete file or the new complete file, never a
//! prefix. Concurrent placements of the same path each stage their own
//! sibling, so the rename is the only point where they meet.

mod error;
mod place;

use std::ffi::OsString;
use std::path::Path;

pub use error::PlacementError;
pub use place::{ensure_parent, place_file};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Prefix for the staged sibling: `bar-1.0.jar` → `.bar-1.0.jar.`; the temp
/// file becomes `.bar-1.0.jar.<random>.part`.
pub fn temp_prefix(final_path: &Path) -> OsString {
    let mut prefix = OsString::from(".");
    if let Some(name) = final_path.file_name() {
        prefix.push(name);
        prefix.push(".");
    }
    prefix
}

/// True if `path` looks like a staged sibling left by [`place_file`].
pub fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') && n.ends_with(TEMP_SUFFIX))
}
