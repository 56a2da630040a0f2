//! Integration tests driving the client through real plugins.

mod helpers;

mod channels_test;
mod plugin_order_test;
mod thread_test;
