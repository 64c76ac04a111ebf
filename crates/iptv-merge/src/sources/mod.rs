//! Source handling
//!
//! Sources are remote playlists in one of two shapes (see [`SourceFormat`]).
//! Each one is fetched through a [`SourceFetcher`], parsed into a
//! [`CategoryChannelMap`](crate::models::CategoryChannelMap) and reported
//! through a [`SourceReporter`]. A source that cannot be fetched contributes
//! an empty map and never aborts the run.
//!
//! # Usage
//!
//! ```rust,no_run
//! use iptv_merge::sources::{SourceCollector, TracingSourceReporter};
//! use iptv_merge::utils::{ChannelNameNormalizer, StandardHttpClient};
//! use std::time::Duration;
//!
//! # async fn example() -> iptv_merge::errors::AppResult<()> {
//! let client = StandardHttpClient::new(Duration::from_secs(30), "iptv-merge")?;
//! let normalizer = ChannelNameNormalizer::new(&["CCTV"])?;
//! let collector = SourceCollector::new(&client, &TracingSourceReporter, &normalizer, 4);
//!
//! let all_channels = collector
//!     .collect_all(&["https://example.com/live.m3u".to_string()])
//!     .await;
//! println!("Collected {} entries", all_channels.entry_count());
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod format;
pub mod m3u;
pub mod traits;
pub mod txt;

pub use collector::SourceCollector;
pub use format::{SourceFormat, parse_source};
pub use traits::*;
