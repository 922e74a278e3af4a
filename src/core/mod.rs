//! Core scanning primitives
//!
//! - Cursor: bounds-checked position over the input, memchr-accelerated runs
//! - Scanner: state machine that reports events to a ScanHandler
//! - Error: the single scan error type
//! - Options: edge-case behavior switches

pub mod cursor;
pub mod error;
pub mod options;
pub mod scanner;

pub use error::{Location, ScanError, ScanErrorKind};
pub use options::{InstructionTerminator, ScanOptions};
pub use scanner::{scan, scan_with_options, ScanHandler, Scanner, TagClose, TagOpen};
