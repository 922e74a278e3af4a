//! Parallel scanning of independent documents
//!
//! Uses Rayon to scan many buffers at once. Scans share no state, so each
//! document gets its own collector and the results keep input order.

use rayon::prelude::*;

use crate::core::{ScanError, ScanOptions};
use crate::dom::{parse_tree_with_options, Node, ProcessError};
use crate::sax::{collect, OwnedEvent};

/// Scan each document in parallel, returning owned events per document
pub fn scan_parallel<D>(docs: &[D], options: ScanOptions) -> Vec<Result<Vec<OwnedEvent>, ScanError>>
where
    D: AsRef<[u8]> + Sync,
{
    docs.par_iter()
        .map(|doc| {
            collect(doc.as_ref(), options)
                .map(|events| events.into_iter().map(|e| e.into_owned()).collect())
        })
        .collect()
}

/// Build a tree for each document in parallel
pub fn parse_trees_parallel<D>(docs: &[D], options: ScanOptions) -> Vec<Result<Vec<Node>, ProcessError>>
where
    D: AsRef<[u8]> + Sync,
{
    docs.par_iter()
        .map(|doc| parse_tree_with_options(doc.as_ref(), options))
        .collect()
}
