//! Delimited-text source parsing
//!
//! ```text
//! 央视频道,#genre#
//! CCTV-1,http://example.com/cctv1.m3u8
//! CCTV-2,http://example.com/cctv2.m3u8
//! ```

use tracing::debug;

use crate::models::{CategoryChannelMap, RawChannelEntry};
use crate::utils::{ChannelNameNormalizer, UrlUtils};

/// Token marking a category header line
pub const GENRE_MARKER: &str = "#genre#";

pub struct TxtParser<'a> {
    normalizer: &'a ChannelNameNormalizer,
}

impl<'a> TxtParser<'a> {
    pub fn new(normalizer: &'a ChannelNameNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn parse(&self, content: &str) -> CategoryChannelMap {
        let mut channels = CategoryChannelMap::new();
        let mut current_category: Option<String> = None;
        let mut placeholder_count = 0;

        for line in content.lines() {
            let line = line.trim();

            if line.contains(GENRE_MARKER) {
                let category = category_name(line);
                if !category.is_empty() {
                    channels.reset_category(&category);
                }
                current_category = (!category.is_empty()).then_some(category);
                continue;
            }

            let Some(category) = current_category.as_deref() else {
                continue;
            };

            match line.split_once(',') {
                Some((name, url)) => {
                    let name = self.normalizer.normalize(name.trim());
                    let url = UrlUtils::clean(url.trim());
                    if UrlUtils::is_valid(&url) {
                        channels.push_unique(category, RawChannelEntry::new(name, url));
                    }
                }
                None if !line.is_empty() => {
                    // Bare name without URL, kept as a placeholder
                    channels.push(category, RawChannelEntry::new(line, ""));
                    placeholder_count += 1;
                }
                None => {}
            }
        }

        debug!(
            "Parsed {} TXT entries in {} categories ({} placeholders)",
            channels.entry_count(),
            channels.category_names().len(),
            placeholder_count
        );
        channels
    }
}

/// Text before the first comma of a header line, trimmed
pub(crate) fn category_name(line: &str) -> String {
    line.split(',').next().unwrap_or_default().trim().to_string()
}
