//! xnode - single-pass push scanner for a small XML-like markup
//!
//! The scanner walks a complete document once and reports lexical events
//! (text, tags, attributes, comments, instructions) to a [`ScanHandler`].
//! It builds no tree, decodes no entities and stops at the first error.
//!
//! Layers:
//! - core: cursor, scanner state machine, errors, options
//! - sax: stored events, collector, markup reconstruction
//! - dom: tag-balancing processor and owned node tree
//! - strategy: parallel scanning of independent documents
//!
//! The `Elixir.XNode.Native` NIF module exposes `scan_events/1`, `scan_parallel/1`
//! and `parse_tree/1`.

use rustler::{Binary, Env, NifResult, Term};

pub mod core;
pub mod dom;
pub mod sax;
pub mod strategy;
mod term;

pub use crate::core::{
    scan, scan_with_options, InstructionTerminator, Location, ScanError, ScanErrorKind,
    ScanHandler, ScanOptions, Scanner, TagClose, TagOpen,
};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// NIFs
// ============================================================================

/// Scan a binary and return `{:ok, events}` or `{:error, message}`
#[rustler::nif]
fn scan_events<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    let bytes = input.as_slice();

    match sax::collect(bytes, ScanOptions::default()) {
        Ok(events) => Ok(term::ok_tuple(env, term::events_to_term(env, events.into_iter()))),
        Err(e) => Ok(term::error_tuple(env, &e.describe(bytes))),
    }
}

/// Scan many binaries on the Rayon pool; one result tuple per input
#[rustler::nif(schedule = "DirtyCpu")]
fn scan_parallel<'a>(env: Env<'a>, inputs: Vec<Binary<'a>>) -> NifResult<Term<'a>> {
    let docs: Vec<&[u8]> = inputs.iter().map(|b| b.as_slice()).collect();
    let results = strategy::scan_parallel(&docs, ScanOptions::default());

    let mut list = Term::list_new_empty(env);
    for (doc, result) in docs.iter().zip(results).rev() {
        let term = match result {
            Ok(events) => term::ok_tuple(
                env,
                term::events_to_term(env, events.iter().map(|e| e.as_event())),
            ),
            Err(e) => term::error_tuple(env, &e.describe(doc)),
        };
        list = list.list_prepend(term);
    }
    Ok(list)
}

/// Build a node tree, checking that tags balance
#[rustler::nif]
fn parse_tree<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    let bytes = input.as_slice();

    match dom::parse_tree(bytes) {
        Ok(nodes) => Ok(term::ok_tuple(env, term::nodes_to_term(env, &nodes))),
        Err(dom::ProcessError::Scan(e)) => Ok(term::error_tuple(env, &e.describe(bytes))),
        Err(e) => Ok(term::error_tuple(env, &e.to_string())),
    }
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.XNode.Native");
