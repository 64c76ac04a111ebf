//! Source format detection

use serde::{Deserialize, Serialize};
use std::fmt;

use super::m3u::M3uParser;
use super::txt::TxtParser;
use crate::models::CategoryChannelMap;
use crate::utils::ChannelNameNormalizer;

/// Marker of an M3U entry-info line
pub const EXTINF_MARKER: &str = "#EXTINF";

/// Number of leading lines inspected when detecting the format
pub const DETECTION_WINDOW: usize = 15;

/// The two playlist shapes sources are published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// `#EXTINF ... group-title="<category>",<name>` followed by a URL line
    M3u,
    /// `<category>,#genre#` headers followed by `<name>,<url>` lines
    Txt,
}

impl SourceFormat {
    /// Treat the whole document as M3U when an `#EXTINF` marker appears
    /// within the first [`DETECTION_WINDOW`] lines
    pub fn detect(content: &str) -> Self {
        if content
            .split('\n')
            .take(DETECTION_WINDOW)
            .any(|line| line.contains(EXTINF_MARKER))
        {
            Self::M3u
        } else {
            Self::Txt
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::M3u => f.write_str("m3u"),
            Self::Txt => f.write_str("txt"),
        }
    }
}

/// Detect the format of `content` and parse it
pub fn parse_source(
    content: &str,
    normalizer: &ChannelNameNormalizer,
) -> (SourceFormat, CategoryChannelMap) {
    let format = SourceFormat::detect(content);
    let channels = match format {
        SourceFormat::M3u => M3uParser::new(normalizer).parse(content),
        SourceFormat::Txt => TxtParser::new(normalizer).parse(content),
    };
    (format, channels)
}
