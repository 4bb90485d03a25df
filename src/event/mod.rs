//! Event system: event and key types, listener registry, propagation.

pub mod dispatch;
pub mod input;
pub mod listener;

pub use dispatch::propagation_path;
pub use input::{Event, Key, CLICK, CONTENT_LOADED, KEY_UP};
pub use listener::{Handler, ListenerRegistry, ListenerTarget};
