//! # chatkit-client
//!
//! Chat client for ChatKit. Every operation runs the same protocol against
//! the registered plugins: precondition (a failure short-circuits the call),
//! request notification, transport call, result notification.

pub mod api;
pub mod client;
pub mod typing;

pub use api::ChatApi;
pub use api::memory::InMemoryChatApi;
pub use client::ChatClient;
