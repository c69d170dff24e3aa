//! Common utilities

use std::path::Path;

/// Get file size in bytes
pub fn get_file_size(path: &Path) -> std::io::Result<u64> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata.len())
}

/// File size in bytes, or `None` if the metadata query fails
pub fn file_size_best_effort(path: &Path) -> Option<u64> {
    match get_file_size(path) {
        Ok(size) => Some(size),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "size query failed");
            None
        }
    }
}
