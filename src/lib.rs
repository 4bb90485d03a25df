//! # toggle-state
//!
//! A declarative, attribute-driven toggle engine for document elements.
//!
//! Trigger elements carry `data-toggle-*` attributes naming the class to
//! toggle, the elements to target and auxiliary behaviours (outside-click
//! dismissal, Escape dismissal, ARIA mirroring, default-active state and
//! turn-off-only controls). The engine interprets them at initialization and
//! on every dispatched event, keeping trigger and target state consistent.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed document arena with selector queries
//! - **[`selector`]**: logos tokenizer, parser and right-to-left matcher
//! - **[`markup`]**: html5ever-backed loader and serializer
//! - **[`event`]**: Events, keys, listener registry, bubble path
//! - **[`toggle`]**: Attribute schema, side table, resolver, executor,
//!   outside coordinator, trigger-off delegation, initializer
//! - **[`engine`]**: `ToggleEngine` and `ToggleConfig`
//! - **[`testing`]**: Headless harness and snapshot helpers
//!
//! ```
//! use toggle_state::ToggleEngine;
//!
//! let mut engine = ToggleEngine::from_markup(
//!     r#"<nav class="menu"><button data-toggle-class="open" data-toggle-target-parent=".menu"></button></nav>"#,
//! )
//! .unwrap();
//! let button = engine.document().query_selector("button").unwrap().unwrap();
//! engine.click(button);
//! assert!(engine.is_active(button));
//! ```

// Host document model
pub mod dom;
pub mod markup;
pub mod selector;

// Events
pub mod event;

// Toggle engine
pub mod engine;
pub mod toggle;

// Test support
pub mod testing;

pub use dom::{Dom, NodeData, NodeId};
pub use engine::{ToggleConfig, ToggleEngine};
pub use event::{Event, Key};
pub use markup::{parse_markup, to_markup, MarkupError};
pub use selector::SelectorError;
pub use toggle::{AttributeSchema, ListenerPolicy};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use toggle_state_macros::markup;
