//! Bounds-checked cursor over the document bytes
//!
//! Uses memchr for the long runs (text, comment and instruction bodies):
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)
//!
//! The cursor never moves past the end of the input. Every lookup returns
//! `Option<u8>` so "at end" is always an explicit, checked state.

use memchr::{memchr, memmem};

use super::error::{ScanError, ScanErrorKind};

/// Cursor over an immutable input buffer
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Cursor { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining bytes
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Get the bytes between `start` and the current position
    #[inline]
    pub fn since(&self, start: usize) -> &'a [u8] {
        &self.input[start..self.pos]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Check the current byte against `byte`
    #[inline]
    pub fn at(&self, byte: u8) -> bool {
        self.peek() == Some(byte)
    }

    /// Advance by n bytes, clamped to the end of the input
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Skip whitespace characters (space, tab, newline, carriage return)
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !is_whitespace(b) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Advance while `pred` holds for the current byte
    #[inline]
    pub fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Advance to the next occurrence of `byte`, or to the end if there is none
    #[inline]
    pub fn skip_until(&mut self, byte: u8) {
        self.pos = match memchr(byte, self.remaining()) {
            Some(i) => self.pos + i,
            None => self.input.len(),
        };
    }

    /// Advance to the next occurrence of `needle`, or to the end if there is none
    #[inline]
    pub fn skip_until_seq(&mut self, needle: &[u8]) {
        self.pos = match memmem::find(self.remaining(), needle) {
            Some(i) => self.pos + i,
            None => self.input.len(),
        };
    }

    /// Consume one literal byte or fail with `UnexpectedCharacter`
    ///
    /// Fails at end of input as well as on a mismatch; the error carries the
    /// expected character.
    #[inline]
    pub fn expect(&mut self, byte: u8) -> Result<(), ScanError> {
        if self.at(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(ScanError::new(
                ScanErrorKind::UnexpectedCharacter {
                    expected: byte as char,
                },
                self.pos,
            ))
        }
    }
}

/// ASCII whitespace as the scanner understands it
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Tag punctuation: `<`, `>` and `/`
#[inline]
pub fn is_tag_character(b: u8) -> bool {
    matches!(b, b'<' | b'>' | b'/')
}

/// Any byte that is neither whitespace nor tag punctuation
#[inline]
pub fn is_tag_name(b: u8) -> bool {
    !(is_whitespace(b) || is_tag_character(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_until() {
        let mut cursor = Cursor::new(b"hello <world>");
        cursor.skip_until(b'<');
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.since(0), b"hello ");
    }

    #[test]
    fn test_skip_until_missing_goes_to_end() {
        let mut cursor = Cursor::new(b"no markup");
        cursor.skip_until(b'<');
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_skip_until_seq() {
        let mut cursor = Cursor::new(b"a ? b ?> c");
        cursor.skip_until_seq(b"?>");
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new(b"  \t\n\r hello");
        cursor.skip_whitespace();
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_skip_while_tag_name() {
        let mut cursor = Cursor::new(b"ns:elem-1 attr");
        cursor.skip_while(is_tag_name);
        assert_eq!(cursor.since(0), b"ns:elem-1");
    }

    #[test]
    fn test_advance_is_clamped() {
        let mut cursor = Cursor::new(b"ab");
        cursor.advance(5);
        assert_eq!(cursor.position(), 2);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_expect() {
        let mut cursor = Cursor::new(b"=\"");
        assert!(cursor.expect(b'=').is_ok());
        assert!(cursor.expect(b'"').is_ok());

        let err = cursor.expect(b'"').unwrap_err();
        assert_eq!(
            err.kind,
            ScanErrorKind::UnexpectedCharacter { expected: '"' }
        );
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_character_classes() {
        for b in [b' ', b'\t', b'\r', b'\n'] {
            assert!(is_whitespace(b));
            assert!(!is_tag_name(b));
        }
        for b in [b'<', b'>', b'/'] {
            assert!(is_tag_character(b));
            assert!(!is_tag_name(b));
        }
        assert!(is_tag_name(b'='));
        assert!(is_tag_name(b'"'));
        assert!(is_tag_name(0xC3));
    }
}
