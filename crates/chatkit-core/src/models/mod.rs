//! Chat domain models shared by the client, the plugins, and the transport.

pub mod channel;
pub mod cid;
pub mod event;
pub mod message;
pub mod query;
pub mod user;

pub use channel::Channel;
pub use cid::Cid;
pub use event::{ChatEvent, TypingEvent};
pub use message::Message;
pub use query::{QueryChannelsRequest, QuerySort, SortDirection};
pub use user::{User, update_users};
