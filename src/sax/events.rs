//! Scan Event Types
//!
//! Value form of the callbacks in [`ScanHandler`](crate::core::ScanHandler),
//! for handlers that want to store events rather than react to them.

use crate::core::{TagClose, TagOpen};

/// A scan event borrowing from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// Text run outside markup
    Text(&'a [u8]),
    BeginTag { name: &'a [u8], open: TagOpen },
    Attribute { name: &'a [u8], value: &'a [u8] },
    FinishTag { open: TagOpen, close: TagClose },
    /// Comment body (between `<!` and `>`)
    Comment(&'a [u8]),
    /// Instruction body (between `<?` and `?>`)
    Instruction(&'a [u8]),
}

/// Owned version of Event for storage past the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedEvent {
    Text(Vec<u8>),
    BeginTag { name: Vec<u8>, open: TagOpen },
    Attribute { name: Vec<u8>, value: Vec<u8> },
    FinishTag { open: TagOpen, close: TagClose },
    Comment(Vec<u8>),
    Instruction(Vec<u8>),
}

impl<'a> Event<'a> {
    /// Copy the payloads out of the input
    pub fn into_owned(self) -> OwnedEvent {
        match self {
            Event::Text(text) => OwnedEvent::Text(text.to_vec()),
            Event::BeginTag { name, open } => OwnedEvent::BeginTag {
                name: name.to_vec(),
                open,
            },
            Event::Attribute { name, value } => OwnedEvent::Attribute {
                name: name.to_vec(),
                value: value.to_vec(),
            },
            Event::FinishTag { open, close } => OwnedEvent::FinishTag { open, close },
            Event::Comment(text) => OwnedEvent::Comment(text.to_vec()),
            Event::Instruction(text) => OwnedEvent::Instruction(text.to_vec()),
        }
    }

    /// Append the markup this event was scanned from
    ///
    /// Whitespace inside tags is normalized to a single space before each
    /// attribute; everything else is reproduced exactly.
    pub fn write_markup(&self, buf: &mut Vec<u8>) {
        match *self {
            Event::Text(text) => buf.extend_from_slice(text),
            Event::BeginTag { name, open } => {
                buf.extend_from_slice(match open {
                    TagOpen::Opening => b"<",
                    TagOpen::Closing => b"</",
                });
                buf.extend_from_slice(name);
            }
            Event::Attribute { name, value } => {
                buf.push(b' ');
                buf.extend_from_slice(name);
                buf.extend_from_slice(b"=\"");
                buf.extend_from_slice(value);
                buf.push(b'"');
            }
            Event::FinishTag { close, .. } => buf.extend_from_slice(match close {
                TagClose::Open => b">",
                TagClose::SelfClosing => b"/>",
            }),
            Event::Comment(text) => {
                buf.extend_from_slice(b"<!");
                buf.extend_from_slice(text);
                buf.push(b'>');
            }
            Event::Instruction(text) => {
                buf.extend_from_slice(b"<?");
                buf.extend_from_slice(text);
                buf.extend_from_slice(b"?>");
            }
        }
    }

    #[inline]
    pub fn is_begin_tag(&self) -> bool {
        matches!(self, Event::BeginTag { .. })
    }

    #[inline]
    pub fn is_finish_tag(&self) -> bool {
        matches!(self, Event::FinishTag { .. })
    }
}

impl OwnedEvent {
    /// Borrow as an Event
    pub fn as_event(&self) -> Event<'_> {
        match self {
            OwnedEvent::Text(text) => Event::Text(text),
            OwnedEvent::BeginTag { name, open } => Event::BeginTag { name, open: *open },
            OwnedEvent::Attribute { name, value } => Event::Attribute { name, value },
            OwnedEvent::FinishTag { open, close } => Event::FinishTag {
                open: *open,
                close: *close,
            },
            OwnedEvent::Comment(text) => Event::Comment(text),
            OwnedEvent::Instruction(text) => Event::Instruction(text),
        }
    }
}

/// Rebuild markup from a sequence of events
pub fn to_markup(events: &[Event<'_>]) -> Vec<u8> {
    let mut buf = Vec::new();
    for event in events {
        event.write_markup(&mut buf);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_owned() {
        let event = Event::Attribute {
            name: b"id",
            value: b"1",
        };
        assert_eq!(
            event.into_owned(),
            OwnedEvent::Attribute {
                name: b"id".to_vec(),
                value: b"1".to_vec()
            }
        );
        assert_eq!(event.into_owned().as_event(), event);
    }

    #[test]
    fn test_to_markup() {
        let events = [
            Event::Instruction(b"xml version=\"1.0\""),
            Event::BeginTag {
                name: b"a",
                open: TagOpen::Opening,
            },
            Event::Attribute {
                name: b"href",
                value: b"/",
            },
            Event::FinishTag {
                open: TagOpen::Opening,
                close: TagClose::Open,
            },
            Event::Text(b"home"),
            Event::Comment(b"-- x --"),
            Event::BeginTag {
                name: b"a",
                open: TagOpen::Closing,
            },
            Event::FinishTag {
                open: TagOpen::Closing,
                close: TagClose::Open,
            },
            Event::BeginTag {
                name: b"br",
                open: TagOpen::Opening,
            },
            Event::FinishTag {
                open: TagOpen::Opening,
                close: TagClose::SelfClosing,
            },
        ];

        assert_eq!(
            to_markup(&events),
            b"<?xml version=\"1.0\"?><a href=\"/\">home<!-- x --></a><br/>".to_vec()
        );
    }
}
