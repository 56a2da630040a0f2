//! Listener capabilities.
//!
//! Each capability is a fixed set of async hooks for one family of client
//! operations. Hooks come in two shapes: notifications, which return
//! nothing, and preconditions, which return a [`ChatResult<()>`] that gates
//! whether the operation proceeds.
//!
//! [`ChatResult<()>`]: chatkit_core::ChatResult

pub mod query_channels;
pub mod thread_query;
pub mod typing;

pub use query_channels::QueryChannelsListener;
pub use thread_query::ThreadQueryListener;
pub use typing::TypingEventListener;

/// Base trait shared by every listener capability.
pub trait Listener: Send + Sync {
    /// Name used when logging hook dispatch.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
