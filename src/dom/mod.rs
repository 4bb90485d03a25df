//! Document arena: slotmap-backed element tree with selector queries.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId, DOCUMENT_TAG};
pub use tree::Dom;
