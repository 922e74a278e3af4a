//! Scanning Strategy Module
//!
//! - Parallel: many independent documents across the Rayon pool

pub mod parallel;

pub use parallel::{parse_trees_parallel, scan_parallel};
