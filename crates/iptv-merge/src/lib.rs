//! Merge IPTV channel listings from many remote playlists into one
//! template-ordered, deduplicated playlist in M3U and TXT form.

pub mod config;
pub mod errors;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod sources;
pub mod template;
pub mod utils;
