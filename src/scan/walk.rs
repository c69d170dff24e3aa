//! Corpus walking
//!
//! Resolves the root of a scan, enumerates directory entries with walkdir,
//! filters them by extension and folds every per-file scan into `Totals`.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::ScanError;
use crate::core::model::{Input, ScanConfig, ScanOutcome, Totals};
use crate::core::paths::normalize_path;
use crate::scan::line::{scan_file_with, scan_stdin};
use crate::scan::source::{FileOpener, FsOpener};

/// Walk the corpus described by `config` using the local filesystem
pub fn walk(config: &ScanConfig) -> Result<Totals, ScanError> {
    CorpusWalker::new(config).walk()
}

/// Drives one scan run over a file, a directory or standard input
pub struct CorpusWalker<'a, O = FsOpener> {
    config: &'a ScanConfig,
    opener: O,
}

impl<'a> CorpusWalker<'a, FsOpener> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Self::with_opener(config, FsOpener)
    }
}

impl<'a, O: FileOpener> CorpusWalker<'a, O> {
    pub fn with_opener(config: &'a ScanConfig, opener: O) -> Self {
        Self { config, opener }
    }

    /// Run the walk and return the accumulated totals.
    ///
    /// Structural failures (missing root, unsupported root kind, traversal
    /// errors, failures on a root file) always abort. Failures of files found
    /// inside a directory abort unless `continue_on_error` is set, in which
    /// case they are counted and the walk moves on.
    pub fn walk(&self) -> Result<Totals, ScanError> {
        let mut totals = Totals::new();

        let root = &self.config.root;
        match root {
            Input::Stdin => {
                if !self.config.extensions.is_empty() {
                    debug!("extension filter does not apply to standard input");
                }
                debug!(input = %root, "scanning standard input");
                let outcome = scan_stdin(self.config.preview_limit)?;
                totals.record_outcome(outcome, self.config.preview_limit);
            }
            Input::Path(root) => self.walk_path(root, &mut totals)?,
        }

        info!(
            files = totals.files_scanned,
            lines = totals.total_lines,
            bytes = totals.total_bytes,
            errors = totals.error_count,
            "scan complete"
        );
        Ok(totals)
    }

    fn walk_path(&self, root: &Path, totals: &mut Totals) -> Result<(), ScanError> {
        let metadata = match fs::metadata(root) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ScanError::PathNotFound(root.to_path_buf()));
            }
            Err(e) => {
                return Err(ScanError::Traversal {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
        };

        if metadata.is_file() {
            self.walk_file(root, totals)
        } else if metadata.is_dir() {
            self.walk_directory(root, totals)
        } else {
            Err(ScanError::PathKindUnsupported(root.to_path_buf()))
        }
    }

    /// A root that is a regular file. Rejection by the extension filter is
    /// not an error; the run just ends up empty.
    fn walk_file(&self, path: &Path, totals: &mut Totals) -> Result<(), ScanError> {
        if !self.config.extensions.allows(path) {
            debug!(path = %normalize_path(path), "root file excluded by extension filter");
            return Ok(());
        }

        let outcome = self.scan_one(path, totals)?;
        totals.record_outcome(outcome, self.config.preview_limit);
        Ok(())
    }

    fn walk_directory(&self, root: &Path, totals: &mut Totals) -> Result<(), ScanError> {
        let mut walker = WalkDir::new(root).min_depth(1).follow_links(false);
        if !self.config.recursive {
            walker = walker.max_depth(1);
        }

        for entry in walker {
            let entry = entry.map_err(|e| traversal_error(root, e))?;
            let path = entry.path();

            if !is_regular_file(&entry) || !self.config.extensions.allows(path) {
                continue;
            }

            match self.scan_one(path, totals) {
                Ok(outcome) => totals.record_outcome(outcome, self.config.preview_limit),
                Err(err) if self.config.continue_on_error => {
                    warn!(path = %normalize_path(path), error = %err, "skipping file");
                    totals.record_error(err.to_string());
                }
                Err(err) => return Err(ScanError::entry(path, err)),
            }
        }

        Ok(())
    }

    /// Scan one file, asking only for as many preview lines as the run
    /// still has room for.
    fn scan_one(&self, path: &Path, totals: &Totals) -> Result<ScanOutcome, ScanError> {
        let room = totals.preview_room(self.config.preview_limit);
        let outcome = scan_file_with(&self.opener, path, room)?;
        debug!(
            path = %normalize_path(path),
            lines = outcome.line_count,
            bytes = ?outcome.byte_size,
            "scanned file"
        );
        Ok(outcome)
    }
}

/// Regular files, including symlinks that resolve to one
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false);
    }
    false
}

/// Keep the underlying I/O error so the path is not repeated in the
/// message. Loop errors carry no I/O error and keep walkdir's wording.
fn traversal_error(root: &Path, err: walkdir::Error) -> ScanError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let detail = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, detail));
    ScanError::Traversal { path, source }
}
