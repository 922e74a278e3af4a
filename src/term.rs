//! Elixir Term Conversion Utilities
//!
//! Converts scan events, trees and errors to Elixir terms.

use rustler::{Encoder, Env, NewBinary, Term};

use crate::core::{TagClose, TagOpen};
use crate::dom::Node;
use crate::sax::Event;

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    ok,
    error,
    cdata,
    begin_tag,
    attribute,
    finish_tag,
    comment,
    instruction,
    opening,
    closing,
    open,
    self_closing,
    element,
}

/// Convert events to an Elixir list
pub fn events_to_term<'a, 'e>(env: Env<'a>, events: impl DoubleEndedIterator<Item = Event<'e>>) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for event in events.rev() {
        list = list.list_prepend(event_to_term(env, event));
    }
    list
}

/// Convert a single event to an Elixir tuple
pub fn event_to_term<'a>(env: Env<'a>, event: Event<'_>) -> Term<'a> {
    match event {
        Event::Text(text) => (cdata(), bytes_to_binary(env, text)).encode(env),
        Event::BeginTag { name, open } => {
            (begin_tag(), bytes_to_binary(env, name), open_to_atom(open)).encode(env)
        }
        Event::Attribute { name, value } => (
            attribute(),
            bytes_to_binary(env, name),
            bytes_to_binary(env, value),
        )
            .encode(env),
        Event::FinishTag { open, close } => {
            (finish_tag(), open_to_atom(open), close_to_atom(close)).encode(env)
        }
        Event::Comment(text) => (comment(), bytes_to_binary(env, text)).encode(env),
        Event::Instruction(text) => (instruction(), bytes_to_binary(env, text)).encode(env),
    }
}

fn open_to_atom(kind: TagOpen) -> rustler::Atom {
    match kind {
        TagOpen::Opening => opening(),
        TagOpen::Closing => closing(),
    }
}

fn close_to_atom(kind: TagClose) -> rustler::Atom {
    match kind {
        TagClose::Open => open(),
        TagClose::SelfClosing => self_closing(),
    }
}

/// Convert a node list: elements become `{:element, name, attrs, children}`,
/// text becomes a binary
pub fn nodes_to_term<'a>(env: Env<'a>, nodes: &[Node]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for node in nodes.iter().rev() {
        list = list.list_prepend(node_to_term(env, node));
    }
    list
}

fn node_to_term<'a>(env: Env<'a>, node: &Node) -> Term<'a> {
    match node {
        Node::Element {
            name,
            attributes,
            children,
        } => {
            let mut attrs = Term::list_new_empty(env);
            for (k, v) in attributes.iter().rev() {
                let tuple = (bytes_to_binary(env, k.as_bytes()), bytes_to_binary(env, v.as_bytes()));
                attrs = attrs.list_prepend(tuple.encode(env));
            }

            (
                element(),
                bytes_to_binary(env, name.as_bytes()),
                attrs,
                nodes_to_term(env, children),
            )
                .encode(env)
        }
        Node::Text(text) => bytes_to_binary(env, text.as_bytes()),
    }
}

/// `{:ok, term}`
pub fn ok_tuple<'a>(env: Env<'a>, term: Term<'a>) -> Term<'a> {
    (ok(), term).encode(env)
}

/// `{:error, message}`
pub fn error_tuple<'a>(env: Env<'a>, message: &str) -> Term<'a> {
    (error(), message).encode(env)
}

/// Create a binary from bytes
pub fn bytes_to_binary<'a>(env: Env<'a>, bytes: &[u8]) -> Term<'a> {
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
