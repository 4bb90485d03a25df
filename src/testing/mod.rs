//! Headless testing framework: Harness, snapshot helpers.
//!
//! Use the [`Harness`] to drive a [`ToggleEngine`](crate::engine::ToggleEngine)
//! loaded from markup by selector. Use [`outline`] and [`engine_outline`] to
//! capture document state as plain text for snapshot-style assertions.

pub mod harness;
pub mod snapshot;

pub use harness::Harness;
pub use snapshot::{engine_outline, outline};
