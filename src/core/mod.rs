//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Scan result model (ScanOutcome, Totals, ScanConfig)
//! - The scan error taxonomy and its exit codes
//! - Rendering functions for different output formats
//! - Path and extension helpers
//! - Common utilities

pub mod error;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
