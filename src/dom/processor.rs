//! Tag-balancing processor
//!
//! Sits between the scanner and a [`Delegate`]: keeps the stack of open tags,
//! gathers each tag's attributes, and turns the flat begin/attribute/finish
//! protocol into structural callbacks.

use thiserror::Error;

use crate::core::{scan_with_options, ScanError, ScanHandler, ScanOptions, TagClose, TagOpen};

/// Attribute pairs of one tag, in source order
pub type Attributes<'a> = [(&'a [u8], &'a [u8])];

/// Receiver of structural callbacks
pub trait Delegate<'a> {
    /// Text, including comments re-wrapped as `<!...>`
    fn text(&mut self, text: &[u8]);

    /// `<name ...>`
    fn tag_start(&mut self, name: &'a [u8], attributes: &Attributes<'a>);

    /// `</name>` matching the innermost open tag
    fn tag_end(&mut self, name: &'a [u8]);

    /// `<name .../>`
    fn tag(&mut self, name: &'a [u8], attributes: &Attributes<'a>);
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Unbalanced tag {found} (expected {})", .expected.as_deref().unwrap_or("no closing tag"))]
    Unbalanced {
        expected: Option<String>,
        found: String,
    },
    #[error("Unclosed tag {name}")]
    Unclosed { name: String },
}

struct Tag<'a> {
    name: &'a [u8],
    attributes: Vec<(&'a [u8], &'a [u8])>,
}

/// ScanHandler that checks tag balance and forwards to a Delegate
pub struct Processor<'a, D> {
    delegate: D,
    stack: Vec<Tag<'a>>,
    error: Option<ProcessError>,
}

impl<'a, D: Delegate<'a>> Processor<'a, D> {
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            stack: Vec::with_capacity(16),
            error: None,
        }
    }

    /// Scan `input` and drive `delegate` with its structure
    pub fn parse(input: &'a [u8], delegate: D, options: ScanOptions) -> Result<D, ProcessError> {
        let processor = scan_with_options(input, Self::new(delegate), options)?;
        processor.finish()
    }

    /// Check the final state and hand back the delegate
    pub fn finish(self) -> Result<D, ProcessError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if let Some(tag) = self.stack.last() {
            return Err(ProcessError::Unclosed {
                name: lossy(tag.name),
            });
        }
        Ok(self.delegate)
    }

    fn failed(&self) -> bool {
        self.error.is_some()
    }
}

impl<'a, D: Delegate<'a>> ScanHandler<'a> for Processor<'a, D> {
    fn cdata(&mut self, text: &'a [u8]) {
        self.delegate.text(text);
    }

    fn begin_tag(&mut self, name: &'a [u8], open: TagOpen) {
        match open {
            TagOpen::Opening => self.stack.push(Tag {
                name,
                attributes: Vec::new(),
            }),
            TagOpen::Closing => match self.stack.pop() {
                Some(current) if current.name == name => self.delegate.tag_end(current.name),
                current => {
                    tracing::debug!(found = %lossy(name), "unbalanced closing tag");
                    self.error = Some(ProcessError::Unbalanced {
                        expected: current.map(|tag| lossy(tag.name)),
                        found: lossy(name),
                    });
                }
            },
        }
    }

    fn attribute(&mut self, name: &'a [u8], value: &'a [u8]) {
        let Some(tag) = self.stack.last_mut() else {
            return;
        };
        // Later duplicates replace earlier values in place
        match tag.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => tag.attributes.push((name, value)),
        }
    }

    fn finish_tag(&mut self, open: TagOpen, close: TagClose) {
        if open == TagOpen::Closing {
            return;
        }
        match close {
            TagClose::SelfClosing => {
                if let Some(tag) = self.stack.pop() {
                    self.delegate.tag(tag.name, &tag.attributes);
                }
            }
            TagClose::Open => {
                if let Some(tag) = self.stack.last() {
                    self.delegate.tag_start(tag.name, &tag.attributes);
                }
            }
        }
    }

    fn comment(&mut self, text: &'a [u8]) {
        let mut wrapped = Vec::with_capacity(text.len() + 3);
        wrapped.extend_from_slice(b"<!");
        wrapped.extend_from_slice(text);
        wrapped.push(b'>');
        self.delegate.text(&wrapped);
    }

    fn instruction(&mut self, _text: &'a [u8]) {}

    /// Unbalanced tags end the scan at once
    fn is_aborted(&self) -> bool {
        self.failed()
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
