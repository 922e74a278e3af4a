//! SAX-style event collection
//!
//! The scanner itself only calls handler methods. This module provides the
//! stored form of those calls:
//!
//! ```text
//! Scanner ---> EventCollector ---> Event<'a>[] ---> OwnedEvent[] / markup
//! ```
//!
//! Events hold slices of the input, so collecting never copies document bytes.
//! Use [`Event::into_owned`] to keep events past the input's lifetime.

pub mod collector;
pub mod events;

pub use collector::{collect, EventCollector};
pub use events::{to_markup, Event, OwnedEvent};
