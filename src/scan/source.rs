//! Opening scan sources

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Opens files for the walker.
///
/// The walker only ever reads through this trait, so the way files are
/// opened can be swapped (tests use it to inject per-file failures).
pub trait FileOpener {
    type Reader: Read;

    fn open(&self, path: &Path) -> io::Result<Self::Reader>;
}

/// Opens files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOpener;

impl FileOpener for FsOpener {
    type Reader = File;

    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}
