//! Scan result model
//!
//! The per-file `ScanOutcome`, the run-wide `Totals` accumulator and the
//! immutable `ScanConfig` a walk is driven by.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum number of per-file error messages kept in `Totals`
pub const MAX_RECORDED_ERRORS: usize = 5;

/// Root argument that selects standard input instead of a path
pub const STDIN_MARKER: &str = "-";

/// Result of scanning one file or stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Number of lines read, including empty ones
    pub line_count: u64,

    /// Size in bytes, when it could be determined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_size: Option<u64>,

    /// Earliest lines of the source, at most the requested preview count
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview_lines: Vec<String>,
}

/// Aggregate counters for one walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub files_scanned: u64,
    pub total_lines: u64,
    pub total_bytes: u64,
    pub error_count: u64,

    /// Messages of the first few recovered failures
    #[serde(default)]
    pub error_messages: Vec<String>,

    /// Earliest lines across the whole run, in visitation order
    #[serde(default)]
    pub preview_lines: Vec<String>,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a successful scan into the totals.
    ///
    /// Preview lines are only taken while the run-wide preview holds fewer
    /// than `preview_limit` lines.
    pub fn record_outcome(&mut self, outcome: ScanOutcome, preview_limit: usize) {
        self.files_scanned += 1;
        self.total_lines += outcome.line_count;
        if let Some(size) = outcome.byte_size {
            self.total_bytes += size;
        }

        let room = self.preview_room(preview_limit);
        self.preview_lines
            .extend(outcome.preview_lines.into_iter().take(room));
    }

    /// Count a recovered per-file failure, keeping its message while fewer
    /// than `MAX_RECORDED_ERRORS` are stored.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.error_count += 1;
        if self.error_messages.len() < MAX_RECORDED_ERRORS {
            self.error_messages.push(message.into());
        }
    }

    /// How many more preview lines the run can accept
    pub fn preview_room(&self, preview_limit: usize) -> usize {
        preview_limit.saturating_sub(self.preview_lines.len())
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// What a walk reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A single synthetic file read from standard input
    Stdin,
    /// A file or directory on disk
    Path(PathBuf),
}

impl Input {
    /// Interpret a raw root argument, where `-` selects standard input
    pub fn from_arg(arg: impl Into<PathBuf>) -> Self {
        let path = arg.into();
        if path.as_os_str() == STDIN_MARKER {
            Input::Stdin
        } else {
            Input::Path(path)
        }
    }

    /// Path used in messages for this input
    pub fn display_path(&self) -> &Path {
        match self {
            Input::Stdin => Path::new("<stdin>"),
            Input::Path(p) => p,
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_path().display())
    }
}

/// Set of accepted file extensions, each including its leading dot.
///
/// An empty filter accepts every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    allowed: BTreeSet<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Whether `path` passes the filter.
    ///
    /// Comparison is a case-sensitive exact match on the final extension.
    pub fn allows(&self, path: &Path) -> bool {
        if self.allowed.is_empty() {
            return true;
        }
        match crate::core::paths::dotted_extension(path) {
            Some(ext) => self.allowed.contains(&ext),
            None => false,
        }
    }
}

/// Immutable settings for one walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub root: Input,
    pub recursive: bool,
    pub extensions: ExtensionFilter,
    /// Maximum preview lines across the run (0 disables the preview)
    pub preview_limit: usize,
    pub continue_on_error: bool,
}

impl ScanConfig {
    /// Create a config for `root` with everything else off
    pub fn new(root: Input) -> Self {
        Self {
            root,
            recursive: false,
            extensions: ExtensionFilter::default(),
            preview_limit: 0,
            continue_on_error: false,
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_extensions(mut self, extensions: ExtensionFilter) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_preview_limit(mut self, preview_limit: usize) -> Self {
        self.preview_limit = preview_limit;
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }
}
