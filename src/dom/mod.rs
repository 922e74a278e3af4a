//! Tree construction on top of the scanner
//!
//! - Processor: ScanHandler that balances tags and calls a Delegate
//! - TreeBuilder: Delegate producing an owned `Node` tree

pub mod node;
pub mod processor;

pub use node::{Node, TreeBuilder};
pub use processor::{Attributes, Delegate, ProcessError, Processor};

use crate::core::ScanOptions;

/// Scan `input` into a list of top-level nodes
pub fn parse_tree(input: &[u8]) -> Result<Vec<Node>, ProcessError> {
    parse_tree_with_options(input, ScanOptions::default())
}

pub fn parse_tree_with_options(
    input: &[u8],
    options: ScanOptions,
) -> Result<Vec<Node>, ProcessError> {
    Processor::parse(input, TreeBuilder::new(), options).map(TreeBuilder::into_nodes)
}
