//! Core data model shared by the parsing, matching, ranking and output stages

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical category -> channel-name ordering that defines the output shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    categories: IndexMap<String, Vec<String>>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or continue) a category; returns its channel list
    pub fn category_mut(&mut self, category: &str) -> &mut Vec<String> {
        self.categories.entry(category.to_string()).or_default()
    }

    /// Start a category afresh: a repeated header keeps the category's
    /// position but drops the channels listed under the earlier header
    pub fn reset_category(&mut self, category: &str) {
        self.category_mut(category).clear();
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, channels)| (name.as_str(), channels.as_slice()))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn channel_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// A `(name, url)` pair as found in one source, after name normalization
/// and URL cleaning
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawChannelEntry {
    pub name: String,
    pub url: String,
}

impl RawChannelEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Ordered category -> entries mapping for one source or for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChannelMap {
    categories: IndexMap<String, Vec<RawChannelEntry>>,
}

impl CategoryChannelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a category exists, keeping its first-seen position
    pub fn ensure_category(&mut self, category: &str) -> &mut Vec<RawChannelEntry> {
        self.categories.entry(category.to_string()).or_default()
    }

    /// Empty a category in place, keeping its first-seen position
    pub fn reset_category(&mut self, category: &str) {
        self.ensure_category(category).clear();
    }

    /// Append unless the exact `(name, url)` pair is already in the category.
    /// Returns whether the entry was added.
    pub fn push_unique(&mut self, category: &str, entry: RawChannelEntry) -> bool {
        let entries = self.ensure_category(category);
        if entries.contains(&entry) {
            return false;
        }
        entries.push(entry);
        true
    }

    /// Append without the duplicate check
    pub fn push(&mut self, category: &str, entry: RawChannelEntry) {
        self.ensure_category(category).push(entry);
    }

    /// Fold another map in: existing categories are extended, new ones are
    /// appended after the current ones
    pub fn merge(&mut self, other: CategoryChannelMap) {
        for (category, entries) in other.categories {
            self.categories.entry(category).or_default().extend(entries);
        }
    }

    pub fn get(&self, category: &str) -> Option<&[RawChannelEntry]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[RawChannelEntry])> {
        self.categories
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn entry_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Template category -> channel -> candidate URLs, in template order
pub type MatchedChannels = IndexMap<String, IndexMap<String, Vec<String>>>;

/// Address family of a stream URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IpFamily {
    V4,
    V6,
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => f.write_str("IPV4"),
            Self::V6 => f.write_str("IPV6"),
        }
    }
}

/// A URL that survived ranking, with its 1-based position inside its channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedUrl {
    pub rank: usize,
    pub url: String,
    pub family: IpFamily,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedChannel {
    pub name: String,
    pub urls: Vec<RankedUrl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCategory {
    pub name: String,
    pub channels: Vec<RankedChannel>,
}

/// Final ordered structure both playlist renderers read from.
///
/// Every template category is present, even when none of its channels kept a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlaylist {
    pub categories: Vec<RankedCategory>,
}

impl RankedPlaylist {
    pub fn url_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.channels)
            .map(|ch| ch.urls.len())
            .sum()
    }

    pub fn channel_count(&self) -> usize {
        self.categories.iter().map(|c| c.channels.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_unique_rejects_exact_duplicates_only() {
        let mut map = CategoryChannelMap::new();
        assert!(map.push_unique("News", RawChannelEntry::new("CCTV13", "http://a/1")));
        assert!(!map.push_unique("News", RawChannelEntry::new("CCTV13", "http://a/1")));
        assert!(map.push_unique("News", RawChannelEntry::new("CCTV13", "http://a/2")));
        assert!(map.push_unique("Other", RawChannelEntry::new("CCTV13", "http://a/1")));
        assert_eq!(map.entry_count(), 3);
    }

    #[test]
    fn test_merge_extends_existing_and_appends_new_categories() {
        let mut all = CategoryChannelMap::new();
        all.push("A", RawChannelEntry::new("X", "u1"));

        let mut second = CategoryChannelMap::new();
        second.push("B", RawChannelEntry::new("Y", "u2"));
        second.push("A", RawChannelEntry::new("X", "u3"));
        all.merge(second);

        assert_eq!(all.category_names(), vec!["A", "B"]);
        let a: Vec<&str> = all.get("A").unwrap().iter().map(|e| e.url.as_str()).collect();
        assert_eq!(a, vec!["u1", "u3"]);
    }

    #[test]
    fn test_reset_category_keeps_position() {
        let mut map = CategoryChannelMap::new();
        map.push("A", RawChannelEntry::new("X", "u1"));
        map.push("B", RawChannelEntry::new("Y", "u2"));
        map.reset_category("A");
        map.push("A", RawChannelEntry::new("Z", "u3"));

        assert_eq!(map.category_names(), vec!["A", "B"]);
        assert_eq!(map.get("A").unwrap(), [RawChannelEntry::new("Z", "u3")]);
    }

    #[test]
    fn test_template_preserves_declaration_order() {
        let mut template = Template::new();
        template.category_mut("Z").push("Z1".into());
        template.category_mut("A").push("A1".into());
        template.category_mut("Z").push("Z2".into());

        let order: Vec<&str> = template.categories().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["Z", "A"]);
        assert_eq!(template.channel_count(), 3);
    }
}
