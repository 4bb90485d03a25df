//! Markup loading and serialization.
//!
//! Documents are parsed with html5ever and converted into a [`Dom`] holding
//! elements and their attributes only. The serializer writes that element
//! tree back out deterministically for assertions and snapshots.
//!
//! [`Dom`]: crate::dom::Dom

pub mod parser;
pub mod serialize;

pub use parser::{parse_markup, MarkupError};
pub use serialize::{element_to_markup, is_void, to_markup};
