//! Path helpers
//!
//! Extension handling shared by the walker filter and CLI validation.

use std::path::Path;

/// The final extension of `path` including its leading dot.
///
/// Returns `None` when the file name has no extension (`Makefile`) or is a
/// bare dotfile (`.bashrc`).
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

/// Check that an allowlist entry looks like `.ext`
pub fn is_valid_extension(ext: &str) -> bool {
    ext.len() > 1 && ext.starts_with('.')
}

/// Normalize a path to use '/' as separator (for stable messages)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
