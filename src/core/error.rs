//! Scan failure taxonomy
//!
//! Every failure the core can report, together with the process exit code
//! the CLI maps it to.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A failure raised while scanning a single source or walking a corpus.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file could not be opened for reading.
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stream reported an error before end of input.
    #[error("Read error while scanning {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Path is neither a file nor a directory: {}", .0.display())]
    PathKindUnsupported(PathBuf),

    /// Enumerating the directory tree itself failed.
    #[error("Directory iteration error under {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file inside a directory walk failed to scan.
    #[error("{source}")]
    Entry {
        path: PathBuf,
        #[source]
        source: Box<ScanError>,
    },
}

impl ScanError {
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScanError::Open {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScanError::Read {
            path: path.into(),
            source,
        }
    }

    /// Wrap a per-file failure encountered while walking a directory.
    pub fn entry(path: impl Into<PathBuf>, source: ScanError) -> Self {
        ScanError::Entry {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScanError::Open { .. } => 6,
            ScanError::Read { .. } => 7,
            ScanError::Entry { .. } => 10,
            ScanError::PathNotFound(_) => 20,
            ScanError::PathKindUnsupported(_) => 21,
            ScanError::Traversal { .. } => 22,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let io_err = || io::Error::new(io::ErrorKind::Other, "boom");

        assert_eq!(ScanError::open("a.csv", io_err()).exit_code(), 6);
        assert_eq!(ScanError::read("a.csv", io_err()).exit_code(), 7);
        assert_eq!(
            ScanError::entry("a.csv", ScanError::read("a.csv", io_err())).exit_code(),
            10
        );
        assert_eq!(ScanError::PathNotFound("x".into()).exit_code(), 20);
        assert_eq!(ScanError::PathKindUnsupported("x".into()).exit_code(), 21);
        let traversal = ScanError::Traversal {
            path: "dir".into(),
            source: io_err(),
        };
        assert_eq!(traversal.exit_code(), 22);
    }

    #[test]
    fn test_entry_message_is_the_inner_message() {
        let inner = ScanError::open(
            "data/b.jsonl",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let expected = inner.to_string();
        let wrapped = ScanError::entry("data/b.jsonl", inner);

        assert_eq!(wrapped.to_string(), expected);
        assert!(expected.contains("data/b.jsonl"));
        assert!(expected.starts_with("Failed to open"));
    }

    #[test]
    fn test_path_messages() {
        let err = ScanError::PathNotFound("missing/dir".into());
        assert_eq!(err.to_string(), "Path does not exist: missing/dir");

        let err = ScanError::PathKindUnsupported("/dev/null".into());
        assert_eq!(
            err.to_string(),
            "Path is neither a file nor a directory: /dev/null"
        );
    }
}
