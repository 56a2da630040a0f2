//! # chatkit-offline
//!
//! Offline support plugin. Keeps thread replies, channel list queries, and
//! typing bookkeeping in memory and uses that state to veto requests that
//! would duplicate work already in flight.

pub mod channels;
pub mod plugin;
pub mod state;
pub mod threads;
pub mod typing;

pub use plugin::{OFFLINE_PLUGIN_ID, OfflinePlugin};
pub use state::{OfflineState, QueryChannelsState, ThreadState};
