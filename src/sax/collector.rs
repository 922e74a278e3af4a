//! Event Collector
//!
//! Implements ScanHandler to gather events into a Vec for batch use.

use super::events::{to_markup, Event};
use crate::core::{scan_with_options, ScanError, ScanHandler, ScanOptions, TagClose, TagOpen};

/// Collector that gathers events during scanning
#[derive(Debug, Default)]
pub struct EventCollector<'a> {
    events: Vec<Event<'a>>,
}

impl<'a> EventCollector<'a> {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(256),
        }
    }

    /// Get the collected events as a slice
    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event<'a>> {
        self.events
    }

    /// Rebuild markup from the collected events
    pub fn to_markup(&self) -> Vec<u8> {
        to_markup(&self.events)
    }
}

impl<'a> ScanHandler<'a> for EventCollector<'a> {
    fn cdata(&mut self, text: &'a [u8]) {
        self.events.push(Event::Text(text));
    }

    fn begin_tag(&mut self, name: &'a [u8], open: TagOpen) {
        self.events.push(Event::BeginTag { name, open });
    }

    fn attribute(&mut self, name: &'a [u8], value: &'a [u8]) {
        self.events.push(Event::Attribute { name, value });
    }

    fn finish_tag(&mut self, open: TagOpen, close: TagClose) {
        self.events.push(Event::FinishTag { open, close });
    }

    fn comment(&mut self, text: &'a [u8]) {
        self.events.push(Event::Comment(text));
    }

    fn instruction(&mut self, text: &'a [u8]) {
        self.events.push(Event::Instruction(text));
    }
}

/// Scan input and return its events
pub fn collect(input: &[u8], options: ScanOptions) -> Result<Vec<Event<'_>>, ScanError> {
    scan_with_options(input, EventCollector::new(), options).map(EventCollector::into_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScanErrorKind;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn events(input: &[u8]) -> Vec<Event<'_>> {
        collect(input, ScanOptions::default()).unwrap()
    }

    #[test]
    fn test_simple_scan() {
        let events = events(b"<root><child/></root>");

        assert_eq!(events.len(), 6);
        assert!(events[0].is_begin_tag());
        assert_eq!(
            events[3],
            Event::FinishTag {
                open: TagOpen::Opening,
                close: TagClose::SelfClosing
            }
        );
    }

    #[test]
    fn test_error_is_returned() {
        let err = collect(b"<a b=1>", ScanOptions::default()).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::UnexpectedCharacter { expected: '"' });
    }

    #[test]
    fn test_payloads_borrow_input() {
        let input = b"<a x=\"y\">z</a>".to_vec();
        let events = events(&input);
        let Event::Text(text) = events[3] else {
            panic!("Expected Text, got {:?}", events[3]);
        };
        let base = input.as_ptr() as usize;
        assert_eq!(text.as_ptr() as usize - base, 9);
    }

    #[test]
    fn test_markup_round_trip() {
        let input = b"<?xml version=\"1.0\"?>\n<doc a=\"1\">\n  <!-- c -->\n  <item\tk=\"v\" />\n</doc >";
        let first = events(input);
        let markup = to_markup(&first);
        assert_eq!(
            markup,
            b"<?xml version=\"1.0\"?>\n<doc a=\"1\">\n  <!-- c -->\n  <item k=\"v\"/>\n</doc>".to_vec()
        );
        assert_eq!(events(&markup), first);
    }

    fn text() -> impl Strategy<Value = String> {
        "[a-z &;.\n]{1,8}"
    }

    fn name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9:-]{0,5}"
    }

    fn attributes() -> impl Strategy<Value = String> {
        proptest::collection::vec((name(), "[a-z0-9 <>/=?!]{0,6}"), 0..3).prop_map(|attrs| {
            attrs
                .into_iter()
                .map(|(k, v)| format!(" {}=\"{}\"", k, v))
                .collect()
        })
    }

    fn piece() -> impl Strategy<Value = String> {
        prop_oneof![
            text(),
            (name(), attributes()).prop_map(|(n, a)| format!("<{}{}>", n, a)),
            (name(), attributes()).prop_map(|(n, a)| format!("<{}{}/>", n, a)),
            name().prop_map(|n| format!("</{}>", n)),
            "[a-z -]{0,8}".prop_map(|c| format!("<!{}>", c)),
            "[a-z ?=\"]{0,8}".prop_map(|i| format!("<?{}?>", i)),
        ]
    }

    proptest! {
        #[test]
        fn rescanning_reconstructed_markup_is_idempotent(
            pieces in proptest::collection::vec(piece(), 0..16)
        ) {
            let doc = pieces.concat();
            let first = events(doc.as_bytes());
            let markup = to_markup(&first);
            prop_assert_eq!(&markup, doc.as_bytes());

            let second = events(&markup);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn begin_and_finish_tags_pair_up(
            pieces in proptest::collection::vec(piece(), 0..16)
        ) {
            let doc = pieces.concat();
            let events = events(doc.as_bytes());

            let mut inside = false;
            for event in &events {
                match event {
                    Event::BeginTag { .. } => {
                        prop_assert!(!inside);
                        inside = true;
                    }
                    Event::FinishTag { .. } => {
                        prop_assert!(inside);
                        inside = false;
                    }
                    Event::Attribute { .. } => prop_assert!(inside),
                    _ => prop_assert!(!inside),
                }
            }
            prop_assert!(!inside);
            let begins = events.iter().filter(|e| e.is_begin_tag()).count();
            let finishes = events.iter().filter(|e| e.is_finish_tag()).count();
            prop_assert_eq!(begins, finishes);
        }
    }
}
