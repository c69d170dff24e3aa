//! Scan module - Line counting and corpus traversal
//!
//! Provides:
//! - line: Line counting with a bounded preview for one stream or file
//! - source: The opener seam files are read through
//! - walk: Root resolution, directory traversal and aggregation

pub mod line;
pub mod source;
pub mod walk;
