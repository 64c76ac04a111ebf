//! Template projection of the merged source data
//!
//! All sources are first folded into one [`CategoryChannelMap`]. A
//! [`ChannelIndex`] over that map gives, for each normalized channel name, the
//! candidate URLs in encounter order. The online category an entry was filed
//! under plays no part in matching; only the name does.

use std::collections::HashMap;
use tracing::debug;

use crate::models::{CategoryChannelMap, MatchedChannels, Template};

/// Normalized channel name -> candidate URLs
#[derive(Debug, Clone, Default)]
pub struct ChannelIndex {
    by_name: HashMap<String, Vec<String>>,
}

impl ChannelIndex {
    /// One pass over the map: categories in first-seen order, then entries
    pub fn build(all_channels: &CategoryChannelMap) -> Self {
        let mut by_name: HashMap<String, Vec<String>> = HashMap::new();
        for (_, entries) in all_channels.categories() {
            for entry in entries {
                by_name
                    .entry(entry.name.clone())
                    .or_default()
                    .push(entry.url.clone());
            }
        }
        Self { by_name }
    }

    pub fn candidates(&self, name: &str) -> Option<&[String]> {
        self.by_name.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Collect candidate URLs for every template channel, in template order.
///
/// Every template category is present in the result; channels without any
/// candidate are not.
pub fn match_channels(template: &Template, all_channels: &CategoryChannelMap) -> MatchedChannels {
    let index = ChannelIndex::build(all_channels);
    let mut matched = MatchedChannels::new();

    for (category, channel_names) in template.categories() {
        let category_matches = matched.entry(category.to_string()).or_default();
        for name in channel_names {
            if let Some(candidates) = index.candidates(name) {
                category_matches
                    .entry(name.clone())
                    .or_default()
                    .extend(candidates.iter().cloned());
            }
        }
    }

    debug!(
        "Matched {} of {} template channels against {} distinct source names",
        matched.values().map(|c| c.len()).sum::<usize>(),
        template.channel_count(),
        index.len()
    );
    matched
}
