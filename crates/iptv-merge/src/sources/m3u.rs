//! M3U source parsing
//!
//! Handles playlists made of `#EXTINF` metadata lines carrying a
//! `group-title` attribute and a display name, each followed by one or more
//! stream URL lines.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::models::{CategoryChannelMap, RawChannelEntry};
use crate::utils::{ChannelNameNormalizer, UrlUtils};

/// `group-title="<category>",<display name>`
fn group_title_pattern() -> &'static Regex {
    static GROUP_TITLE: OnceLock<Regex> = OnceLock::new();
    GROUP_TITLE.get_or_init(|| {
        Regex::new(r#"group-title="(.*?)",(.*)"#).expect("group-title pattern is valid")
    })
}

/// Category and normalized name of the most recent `#EXTINF` line
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEntry {
    category: String,
    name: String,
}

pub struct M3uParser<'a> {
    normalizer: &'a ChannelNameNormalizer,
}

impl<'a> M3uParser<'a> {
    pub fn new(normalizer: &'a ChannelNameNormalizer) -> Self {
        Self { normalizer }
    }

    /// Parse M3U content into an ordered category map
    pub fn parse(&self, content: &str) -> CategoryChannelMap {
        let mut channels = CategoryChannelMap::new();
        let mut pending: Option<PendingEntry> = None;
        let mut duplicate_count = 0;
        let mut rejected_count = 0;

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.starts_with(super::format::EXTINF_MARKER) {
                match self.parse_extinf_line(line) {
                    Some(entry) => {
                        channels.ensure_category(&entry.category);
                        pending = Some(entry);
                    }
                    // Following URLs stay with the previous channel
                    None => debug!("EXTINF without group-title at line {}", line_num + 1),
                }
                continue;
            }

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // URL line: belongs to the most recent EXTINF until the next one
            let Some(entry) = &pending else {
                debug!("Skipping URL without EXTINF metadata at line {}", line_num + 1);
                continue;
            };
            if entry.category.is_empty() || entry.name.is_empty() {
                continue;
            }

            let url = UrlUtils::clean(line);
            if !UrlUtils::is_valid(&url) {
                rejected_count += 1;
                continue;
            }

            if !channels.push_unique(&entry.category, RawChannelEntry::new(&entry.name, url)) {
                duplicate_count += 1;
            }
        }

        debug!(
            "Parsed {} M3U entries in {} categories ({} duplicates, {} rejected URLs)",
            channels.entry_count(),
            channels.category_names().len(),
            duplicate_count,
            rejected_count
        );
        channels
    }

    /// Extract category and normalized name from an EXTINF line
    fn parse_extinf_line(&self, line: &str) -> Option<PendingEntry> {
        let captures = group_title_pattern().captures(line)?;
        Some(PendingEntry {
            category: captures[1].trim().to_string(),
            name: self.normalizer.normalize(captures[2].trim()),
        })
    }
}
