//! Prelude for convenient imports when writing plugins.

pub use async_trait::async_trait;

pub use chatkit_core::models::{Channel, ChatEvent, Cid, Message, QueryChannelsRequest, TypingEvent};
pub use chatkit_core::{ChatError, ChatResult};

pub use crate::listeners::{
    Listener, QueryChannelsListener, ThreadQueryListener, TypingEventListener,
};
pub use crate::plugin::{Plugin, PluginInfo};

pub use crate::plugin_info;
