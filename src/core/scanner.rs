//! Push scanner with ScanHandler trait
//!
//! Walks a complete document once and reports lexical events, in document
//! order, to a [`ScanHandler`]. No tree is built here: the handler decides
//! what to keep.
//!
//! ```text
//! scan ──> scan_cdata ──> ScanHandler::cdata
//!      └─> scan_tag ──┬─> scan_tag_normal ──> begin_tag, attribute*, finish_tag
//!                     ├─> scan_tag_comment ──> comment
//!                     └─> scan_tag_instruction ──> instruction
//! ```

use super::cursor::{is_tag_character, is_tag_name, Cursor};
use super::error::ScanError;
use super::options::{InstructionTerminator, ScanOptions};

/// Whether a tag began with `<` or `</`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagOpen {
    Opening,
    Closing,
}

/// Whether a tag ended with `>` or `/>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClose {
    Open,
    SelfClosing,
}

/// Trait for receiving scan events
///
/// Payloads are slices of the scanned input and live as long as it does.
/// Every `begin_tag` is followed by zero or more `attribute` calls and then
/// exactly one `finish_tag`, unless the scan fails or is aborted in between.
pub trait ScanHandler<'a> {
    /// Non-empty text outside any markup
    fn cdata(&mut self, text: &'a [u8]);

    /// Tag name, reported before any of the tag's attributes
    fn begin_tag(&mut self, name: &'a [u8], open: TagOpen);

    /// One `name="value"` pair, in source order
    fn attribute(&mut self, name: &'a [u8], value: &'a [u8]);

    /// End of the tag started by the last `begin_tag`
    fn finish_tag(&mut self, open: TagOpen, close: TagClose);

    /// Body of a `<! ... >` construct
    fn comment(&mut self, text: &'a [u8]);

    /// Body of a `<? ... ?>` construct
    fn instruction(&mut self, text: &'a [u8]);

    /// Stop the scan after the current event
    ///
    /// Checked after every construct and right after `begin_tag`. An aborted
    /// scan returns `Ok`; the handler keeps whatever caused it to stop.
    fn is_aborted(&self) -> bool {
        false
    }
}

impl<'a, T: ScanHandler<'a> + ?Sized> ScanHandler<'a> for &mut T {
    fn cdata(&mut self, text: &'a [u8]) {
        (**self).cdata(text)
    }

    fn begin_tag(&mut self, name: &'a [u8], open: TagOpen) {
        (**self).begin_tag(name, open)
    }

    fn attribute(&mut self, name: &'a [u8], value: &'a [u8]) {
        (**self).attribute(name, value)
    }

    fn finish_tag(&mut self, open: TagOpen, close: TagClose) {
        (**self).finish_tag(open, close)
    }

    fn comment(&mut self, text: &'a [u8]) {
        (**self).comment(text)
    }

    fn instruction(&mut self, text: &'a [u8]) {
        (**self).instruction(text)
    }

    fn is_aborted(&self) -> bool {
        (**self).is_aborted()
    }
}

/// Single-pass scanner over one document
pub struct Scanner<'a, H> {
    input: &'a [u8],
    cursor: Cursor<'a>,
    handler: H,
    options: ScanOptions,
}

impl<'a, H: ScanHandler<'a>> Scanner<'a, H> {
    /// Create a scanner with default options
    pub fn new(handler: H, input: &'a [u8]) -> Self {
        Self::with_options(handler, input, ScanOptions::default())
    }

    pub fn with_options(handler: H, input: &'a [u8], options: ScanOptions) -> Self {
        Self {
            input,
            cursor: Cursor::new(input),
            handler,
            options,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Scan the whole document
    ///
    /// Returns at the end of the input, or with the first error. Events
    /// already delivered before an error are not retracted.
    pub fn scan(&mut self) -> Result<(), ScanError> {
        let _span = tracing::debug_span!("scan", len = self.input.len()).entered();

        let result = self.scan_document();
        if let Err(err) = &result {
            tracing::debug!(offset = err.offset, error = %err.kind, "scan failed");
        }
        result
    }

    fn scan_document(&mut self) -> Result<(), ScanError> {
        while !self.cursor.is_eof() {
            let start = self.cursor.position();

            self.scan_cdata();
            if self.handler.is_aborted() {
                break;
            }
            self.scan_tag()?;
            if self.handler.is_aborted() {
                break;
            }

            if self.cursor.position() == start {
                return Err(ScanError::stuck(self.input, start));
            }
        }
        Ok(())
    }

    /// Scan a run of text up to the next '<'
    fn scan_cdata(&mut self) {
        let start = self.cursor.position();
        self.cursor.skip_until(b'<');

        let text = self.cursor.since(start);
        if !text.is_empty() {
            self.handler.cdata(text);
        }
    }

    /// Dispatch on the byte after '<'; does nothing anywhere else
    fn scan_tag(&mut self) -> Result<(), ScanError> {
        if !self.cursor.at(b'<') {
            return Ok(());
        }
        self.cursor.advance(1);

        match self.cursor.peek() {
            Some(b'/') => {
                self.cursor.advance(1);
                self.scan_tag_normal(TagOpen::Closing)
            }
            Some(b'!') => {
                self.cursor.advance(1);
                self.scan_tag_comment()
            }
            Some(b'?') => {
                self.cursor.advance(1);
                self.scan_tag_instruction()
            }
            _ => self.scan_tag_normal(TagOpen::Opening),
        }
    }

    fn scan_tag_normal(&mut self, open: TagOpen) -> Result<(), ScanError> {
        let name_start = self.cursor.position();
        self.cursor.skip_while(is_tag_name);
        let name = self.cursor.since(name_start);

        tracing::trace!(offset = name_start, ?open, "tag");
        self.handler.begin_tag(name, open);
        if self.handler.is_aborted() {
            tracing::debug!(offset = name_start, "scan aborted by handler");
            return Ok(());
        }

        self.cursor.skip_whitespace();

        if matches!(self.cursor.peek(), Some(b) if !is_tag_character(b)) {
            self.scan_attributes()?;
        }

        let close = match self.cursor.peek() {
            Some(b'/') => {
                if open == TagOpen::Closing {
                    return Err(ScanError::malformed(
                        "Tag cannot be closed at both ends!",
                        self.cursor.position(),
                    ));
                }
                self.cursor.advance(1);
                if self.options.strict_self_close {
                    self.cursor.expect(b'>')?;
                } else {
                    self.cursor.advance(1);
                }
                TagClose::SelfClosing
            }
            Some(b'>') => {
                self.cursor.advance(1);
                TagClose::Open
            }
            _ => {
                return Err(ScanError::malformed(
                    "Invalid characters in tag!",
                    self.cursor.position(),
                ))
            }
        };

        self.handler.finish_tag(open, close);
        Ok(())
    }

    /// Scan `name="value"` pairs up to the first tag punctuation byte
    fn scan_attributes(&mut self) -> Result<(), ScanError> {
        while matches!(self.cursor.peek(), Some(b) if !is_tag_character(b)) {
            self.cursor.skip_whitespace();

            let name_start = self.cursor.position();
            self.cursor.skip_until(b'=');
            let name = self.cursor.since(name_start);

            self.cursor.expect(b'=')?;
            self.cursor.expect(b'"')?;

            let value_start = self.cursor.position();
            self.cursor.skip_until(b'"');
            let value = self.cursor.since(value_start);

            self.cursor.expect(b'"')?;

            self.handler.attribute(name, value);

            self.cursor.skip_whitespace();
        }
        Ok(())
    }

    /// Scan `<! ... >`; the first '>' ends the comment
    fn scan_tag_comment(&mut self) -> Result<(), ScanError> {
        let start = self.cursor.position();
        self.cursor.skip_until(b'>');
        let text = self.cursor.since(start);

        self.cursor.expect(b'>')?;

        tracing::trace!(offset = start, "comment");
        self.handler.comment(text);
        Ok(())
    }

    fn scan_tag_instruction(&mut self) -> Result<(), ScanError> {
        let start = self.cursor.position();

        match self.options.instruction_terminator {
            InstructionTerminator::Sequence => self.cursor.skip_until_seq(b"?>"),
            InstructionTerminator::Legacy => {
                while let (Some(current), Some(next)) = (self.cursor.peek(), self.cursor.peek_at(1)) {
                    if current == b'?' || next == b'>' {
                        break;
                    }
                    self.cursor.advance(1);
                }
            }
        }

        let text = self.cursor.since(start);

        self.cursor.expect(b'?')?;
        self.cursor.expect(b'>')?;

        tracing::trace!(offset = start, "instruction");
        self.handler.instruction(text);
        Ok(())
    }
}

/// Scan `input` with default options, sending events to `handler`
pub fn scan<'a, H: ScanHandler<'a>>(input: &'a [u8], handler: H) -> Result<H, ScanError> {
    scan_with_options(input, handler, ScanOptions::default())
}

pub fn scan_with_options<'a, H: ScanHandler<'a>>(
    input: &'a [u8],
    handler: H,
    options: ScanOptions,
) -> Result<H, ScanError> {
    let mut scanner = Scanner::with_options(handler, input, options);
    scanner.scan()?;
    Ok(scanner.into_handler())
}
