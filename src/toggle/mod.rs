//! Toggle engine internals.
//!
//! [`schema`] defines the markup attributes and reads trigger configuration;
//! [`state`] is the side table; the remaining modules add the resolver,
//! executor, outside coordinator, trigger-off delegation and initializer as
//! `impl ToggleEngine` blocks.

pub mod executor;
pub mod init;
pub mod outside;
pub mod resolver;
pub mod schema;
pub mod state;
pub mod trigger_off;

pub use outside::{ListenerPolicy, OutsideCoordinator};
pub use schema::{AttributeSchema, Targeting, Trigger, ARIA_EXPANDED, ARIA_SELECTED};
pub use state::{SideTable, TriggerState};
