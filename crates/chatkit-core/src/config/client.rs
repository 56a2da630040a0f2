//! Chat client configuration.

use serde::{Deserialize, Serialize};

/// Client-side paging defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Number of thread replies requested per page.
    #[serde(default = "default_replies_page_size")]
    pub replies_page_size: usize,
    /// Number of channels requested per page.
    #[serde(default = "default_channels_page_size")]
    pub channels_page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            replies_page_size: default_replies_page_size(),
            channels_page_size: default_channels_page_size(),
        }
    }
}

fn default_replies_page_size() -> usize {
    30
}

fn default_channels_page_size() -> usize {
    30
}
