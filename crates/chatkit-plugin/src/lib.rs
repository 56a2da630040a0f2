//! # chatkit-plugin
//!
//! Plugin framework for ChatKit. Provides:
//!
//! - Listener capabilities plugins implement to observe and gate client
//!   operations (thread queries, channel queries, typing events)
//! - Composites presenting an ordered group of listeners as one listener,
//!   with run-all / first-failure-wins precondition aggregation
//! - Plugin registry with registration-ordered listener collection
//! - Plugin manager handling load/unload and composite construction

pub mod composite;
pub mod listeners;
pub mod macros;
pub mod manager;
pub mod plugin;
pub mod prelude;
pub mod registry;

pub use composite::{
    DispatchPolicy, QueryChannelsListenerComposite, ThreadQueryListenerComposite,
    TypingEventListenerComposite,
};
pub use listeners::{Listener, QueryChannelsListener, ThreadQueryListener, TypingEventListener};
pub use manager::PluginManager;
pub use plugin::{Plugin, PluginInfo};
pub use registry::PluginRegistry;
