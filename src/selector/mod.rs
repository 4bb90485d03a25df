//! Selector engine: tokenizer, parser, matching.

pub mod matching;
pub mod model;
pub mod parser;
pub mod tokenizer;

pub use model::{AttributeOperator, AttributeSelector, Selector, SelectorList};
pub use parser::{parse_selector_list, SelectorError};
