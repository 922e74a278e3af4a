//! Scan errors
//!
//! A single error type for everything that can abort a scan. The first error
//! ends the scan; there is no resynchronization.

use thiserror::Error;

/// Number of bytes of unconsumed input quoted in a stuck-scanner error
pub const EXCERPT_LEN: usize = 10;

/// Error raised by [`Scanner::scan`](super::scanner::Scanner::scan)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (at byte {offset})")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    /// Byte offset at which the error was detected
    pub offset: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A required delimiter was missing, or the input ended first
    #[error("Expected Character {expected}")]
    UnexpectedCharacter { expected: char },
    /// The driver made no progress in one iteration
    #[error("Parser Stuck at {excerpt}")]
    StuckScanner { excerpt: String },
    #[error("{0}")]
    MalformedTag(&'static str),
}

/// 1-based line and 0-based byte column of an offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl ScanError {
    pub fn new(kind: ScanErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub(crate) fn stuck(input: &[u8], offset: usize) -> Self {
        let end = (offset + EXCERPT_LEN).min(input.len());
        let excerpt = String::from_utf8_lossy(&input[offset..end]).into_owned();
        Self::new(ScanErrorKind::StuckScanner { excerpt }, offset)
    }

    pub(crate) fn malformed(message: &'static str, offset: usize) -> Self {
        Self::new(ScanErrorKind::MalformedTag(message), offset)
    }

    /// Locate the error within the scanned input
    pub fn location(&self, input: &[u8]) -> Location {
        Location::of(input, self.offset)
    }

    /// Render the error with its line and column, e.g. for logs
    pub fn describe(&self, input: &[u8]) -> String {
        let Location { line, column } = self.location(input);
        format!("Scan Error: {} @ [{}:{}]", self.kind, line, column)
    }
}

impl Location {
    /// Compute the location of `offset` in `input`
    ///
    /// Offsets past the end are clamped to the end of the input.
    pub fn of(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = 1 + memchr::memchr_iter(b'\n', before).count();
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);

        Location {
            line,
            column: offset - line_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ScanError::new(ScanErrorKind::UnexpectedCharacter { expected: '=' }, 4);
        assert_eq!(err.to_string(), "Expected Character = (at byte 4)");

        let err = ScanError::malformed("Tag cannot be closed at both ends!", 3);
        assert_eq!(
            err.kind.to_string(),
            "Tag cannot be closed at both ends!"
        );
    }

    #[test]
    fn test_stuck_excerpt_is_bounded() {
        let input = b"0123456789abcdef";
        let err = ScanError::stuck(input, 2);
        assert_eq!(
            err.kind,
            ScanErrorKind::StuckScanner {
                excerpt: "23456789ab".to_string()
            }
        );

        let err = ScanError::stuck(input, 14);
        assert_eq!(
            err.kind,
            ScanErrorKind::StuckScanner {
                excerpt: "ef".to_string()
            }
        );
    }

    #[test]
    fn test_location() {
        let input = b"<a>\n  <b>\n</a>";
        assert_eq!(Location::of(input, 0), Location { line: 1, column: 0 });
        assert_eq!(Location::of(input, 6), Location { line: 2, column: 2 });
        assert_eq!(Location::of(input, 10), Location { line: 3, column: 0 });
        assert_eq!(Location::of(input, 99), Location { line: 3, column: 4 });
    }

    #[test]
    fn test_describe() {
        let input = b"<a>\n<b c=1>";
        let err = ScanError::new(ScanErrorKind::UnexpectedCharacter { expected: '"' }, 9);
        assert_eq!(
            err.describe(input),
            "Scan Error: Expected Character \" @ [2:5]"
        );
    }
}
