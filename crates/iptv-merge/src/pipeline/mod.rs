//! Matching and ranking pipeline
//!
//! ```text
//! template ─────────────────────────────┐
//!                                       ▼
//! sources ─► CategoryChannelMap ─► match_channels ─► UrlRanker ─► RankedPlaylist
//!                                                     ▲
//!                                              WrittenUrlSet
//! ```

pub mod matcher;
pub mod orchestrator;
pub mod ranking;

pub use matcher::{ChannelIndex, match_channels};
pub use orchestrator::{Pipeline, RunSummary};
pub use ranking::{UrlRanker, WrittenUrlSet};
