//! Utility modules for iptv-merge
//!
//! This module contains reusable helpers shared by the source parsers,
//! the ranking stage and the HTTP fetcher.

pub mod channel_name;
pub mod http_client;
pub mod url;

// Re-export commonly used types for convenience
pub use channel_name::ChannelNameNormalizer;
pub use http_client::StandardHttpClient;
pub use url::UrlUtils;
