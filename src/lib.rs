pub mod bin_tree;
pub mod logging;
pub mod tree;

pub use bin_tree::{BinTree, Node};
pub use tree::TreeOps;

#[cfg(test)]
mod proptests;
