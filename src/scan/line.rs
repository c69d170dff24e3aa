//! Line scanning
//!
//! Counts the lines of a single stream and keeps the first few as a preview.

use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::core::error::ScanError;
use crate::core::model::{Input, ScanOutcome};
use crate::core::util::file_size_best_effort;
use crate::scan::source::{FileOpener, FsOpener};

/// Count the lines of `reader`, capturing at most `preview_limit` of them.
///
/// Lines are split on `\n`; the last line does not need a terminator. The
/// terminator (and a `\r` before it) is not part of the captured text, and
/// invalid UTF-8 is replaced rather than rejected. `byte_size` is the number
/// of bytes consumed.
///
/// Any I/O error before end of input fails the whole scan.
pub fn scan_reader<R: BufRead>(mut reader: R, preview_limit: usize) -> io::Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();
    let mut consumed: u64 = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }
        consumed += n as u64;
        outcome.line_count += 1;

        if outcome.preview_lines.len() < preview_limit {
            outcome.preview_lines.push(line_text(&buf));
        }
    }

    outcome.byte_size = Some(consumed);
    Ok(outcome)
}

/// Scan the file at `path` through `opener`.
///
/// Opening happens before any read and fails with `ScanError::Open`. The byte
/// size comes from the file's metadata and is left empty if that query fails.
pub fn scan_file_with<O: FileOpener>(
    opener: &O,
    path: &Path,
    preview_limit: usize,
) -> Result<ScanOutcome, ScanError> {
    let file = opener.open(path).map_err(|e| ScanError::open(path, e))?;

    let mut outcome = scan_reader(BufReader::new(file), preview_limit)
        .map_err(|e| ScanError::read(path, e))?;
    outcome.byte_size = file_size_best_effort(path);

    Ok(outcome)
}

/// Scan a file from the local filesystem
#[allow(dead_code)]
pub fn scan_path(path: &Path, preview_limit: usize) -> Result<ScanOutcome, ScanError> {
    scan_file_with(&FsOpener, path, preview_limit)
}

/// Scan standard input as a single synthetic file
pub fn scan_stdin(preview_limit: usize) -> Result<ScanOutcome, ScanError> {
    let stdin = io::stdin();
    scan_reader(stdin.lock(), preview_limit)
        .map_err(|e| ScanError::read(Input::Stdin.display_path(), e))
}

fn line_text(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
