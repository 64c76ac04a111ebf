//! Candidate URL ranking and cross-channel deduplication

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::config::{DedupScope, IpVersionPriority, MatchingConfig};
use crate::models::{
    MatchedChannels, RankedCategory, RankedChannel, RankedPlaylist, RankedUrl, Template,
};
use crate::utils::UrlUtils;

/// URLs already written during one run
#[derive(Debug, Clone, Default)]
pub struct WrittenUrlSet {
    scope: DedupScope,
    global: HashSet<String>,
    per_category: HashMap<String, HashSet<String>>,
}

impl WrittenUrlSet {
    pub fn new(scope: DedupScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn contains(&self, category: &str, url: &str) -> bool {
        match self.scope {
            DedupScope::Global => self.global.contains(url),
            DedupScope::Category => self
                .per_category
                .get(category)
                .is_some_and(|urls| urls.contains(url)),
        }
    }

    /// Record a written URL; returns false when it was already recorded
    pub fn insert(&mut self, category: &str, url: &str) -> bool {
        match self.scope {
            DedupScope::Global => self.global.insert(url.to_string()),
            DedupScope::Category => self
                .per_category
                .entry(category.to_string())
                .or_default()
                .insert(url.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        match self.scope {
            DedupScope::Global => self.global.len(),
            DedupScope::Category => self.per_category.values().map(HashSet::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sorts, filters and numbers candidate URLs
#[derive(Debug, Clone)]
pub struct UrlRanker {
    priority: IpVersionPriority,
    blacklist: Vec<String>,
}

impl UrlRanker {
    pub fn new(priority: IpVersionPriority, blacklist: Vec<String>) -> Self {
        Self {
            priority,
            blacklist,
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(config.ip_version_priority, config.url_blacklist.clone())
    }

    /// Order by preferred address family, then domain, then the full URL
    pub fn sort_candidates(&self, candidates: &[String]) -> Vec<String> {
        let mut sorted = candidates.to_vec();
        sorted.sort_by_cached_key(|url| {
            let is_ipv6 = UrlUtils::is_ipv6(url);
            let family_key = match self.priority {
                IpVersionPriority::Ipv6 => !is_ipv6,
                IpVersionPriority::Ipv4 => is_ipv6,
            };
            (family_key, UrlUtils::extract_domain(url).to_string(), url.clone())
        });
        sorted
    }

    pub fn is_blacklisted(&self, url: &str) -> bool {
        self.blacklist.iter().any(|pattern| url.contains(pattern.as_str()))
    }

    /// Rank one channel's candidates, claiming survivors in `written`.
    ///
    /// Candidates are compared in their written form, cut at the first `$`.
    pub fn rank_channel(
        &self,
        category: &str,
        candidates: &[String],
        written: &mut WrittenUrlSet,
    ) -> Vec<RankedUrl> {
        let mut ranked = Vec::new();
        for candidate in self.sort_candidates(candidates) {
            let url = UrlUtils::strip_annotation(&candidate);
            if url.is_empty() || written.contains(category, url) || self.is_blacklisted(url) {
                continue;
            }
            written.insert(category, url);
            ranked.push(RankedUrl {
                rank: ranked.len() + 1,
                family: UrlUtils::ip_family(url),
                url: url.to_string(),
            });
        }
        ranked
    }

    /// Rank every template channel in template order.
    ///
    /// All template categories are kept; channels left without URLs are dropped.
    pub fn rank_playlist(
        &self,
        template: &Template,
        matched: &MatchedChannels,
        written: &mut WrittenUrlSet,
    ) -> RankedPlaylist {
        let mut playlist = RankedPlaylist::default();

        for (category, channel_names) in template.categories() {
            let mut ranked_category = RankedCategory {
                name: category.to_string(),
                channels: Vec::new(),
            };

            if let Some(category_matches) = matched.get(category) {
                for name in channel_names {
                    let Some(candidates) = category_matches.get(name) else {
                        continue;
                    };
                    let urls = self.rank_channel(category, candidates, written);
                    if urls.is_empty() {
                        debug!("No usable URL left for {} / {}", category, name);
                        continue;
                    }
                    ranked_category.channels.push(RankedChannel {
                        name: name.clone(),
                        urls,
                    });
                }
            }

            playlist.categories.push(ranked_category);
        }

        playlist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryChannelMap, IpFamily, RawChannelEntry};
    use crate::output::TxtRenderer;
    use crate::pipeline::matcher::match_channels;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sort_prefers_ipv4_then_domain_then_url() {
        let ranker = UrlRanker::new(IpVersionPriority::Ipv4, vec![]);
        let sorted = ranker.sort_candidates(&strings(&[
            "http://[2409::1]/a",
            "http://b.com/2",
            "http://a.com/9",
            "http://b.com/1",
        ]));
        assert_eq!(
            sorted,
            strings(&["http://a.com/9", "http://b.com/1", "http://b.com/2", "http://[2409::1]/a"])
        );
    }

    #[test]
    fn test_sort_by_domain_is_case_sensitive() {
        let ranker = UrlRanker::new(IpVersionPriority::Ipv4, vec![]);
        let sorted = ranker.sort_candidates(&strings(&["http://a.example/y", "http://B.example/x"]));
        assert_eq!(sorted, strings(&["http://B.example/x", "http://a.example/y"]));
    }

    #[test]
    fn test_sort_prefers_ipv6_when_configured() {
        let ranker = UrlRanker::new(IpVersionPriority::Ipv6, vec![]);
        let sorted = ranker.sort_candidates(&strings(&["http://a.com/1", "http://[2409::1]/a"]));
        assert_eq!(sorted, strings(&["http://[2409::1]/a", "http://a.com/1"]));
    }

    #[test]
    fn test_rank_channel_filters_and_numbers() {
        let ranker = UrlRanker::new(IpVersionPriority::Ipv4, strings(&["blocked.example"]));
        let mut written = WrittenUrlSet::new(DedupScope::Global);
        written.insert("Other", "http://seen.example/1");

        let ranked = ranker.rank_channel(
            "News",
            &strings(&[
                "",
                "http://seen.example/1",
                "http://blocked.example/x",
                "http://b.example/1",
                "http://a.example/1",
                "http://a.example/1",
                "http://[::1]/v6",
            ]),
            &mut written,
        );

        let urls: Vec<(usize, &str, IpFamily)> = ranked
            .iter()
            .map(|r| (r.rank, r.url.as_str(), r.family))
            .collect();
        assert_eq!(
            urls,
            vec![
                (1, "http://a.example/1", IpFamily::V4),
                (2, "http://b.example/1", IpFamily::V4),
                (3, "http://[::1]/v6", IpFamily::V6),
            ]
        );
        assert!(written.contains("Anything", "http://a.example/1"));
        assert!(!written.contains("News", "http://blocked.example/x"));
    }

    #[test]
    fn test_global_scope_first_category_wins() {
        let mut template = Template::new();
        template.category_mut("A").push("CCTV5".into());
        template.category_mut("B").push("CCTV5".into());
        let mut all = CategoryChannelMap::new();
        all.push("Online", RawChannelEntry::new("CCTV5", "http://a/5"));
        let matched = match_channels(&template, &all);

        let ranker = UrlRanker::new(IpVersionPriority::Ipv4, vec![]);
        let mut written = WrittenUrlSet::new(DedupScope::Global);
        let playlist = ranker.rank_playlist(&template, &matched, &mut written);

        assert_eq!(playlist.categories.len(), 2);
        assert_eq!(playlist.categories[0].channels.len(), 1);
        assert!(playlist.categories[1].channels.is_empty());
    }

    #[test]
    fn test_category_scope_keeps_each_category() {
        let mut template = Template::new();
        template.category_mut("A").push("CCTV5".into());
        template.category_mut("B").push("CCTV5".into());
        let mut all = CategoryChannelMap::new();
        all.push("Online", RawChannelEntry::new("CCTV5", "http://a/5"));
        let matched = match_channels(&template, &all);

        let ranker = UrlRanker::new(IpVersionPriority::Ipv4, vec![]);
        let mut written = WrittenUrlSet::new(DedupScope::Category);
        let playlist = ranker.rank_playlist(&template, &matched, &mut written);

        assert_eq!(playlist.categories[0].channels[0].urls[0].url, "http://a/5");
        assert_eq!(playlist.categories[1].channels[0].urls[0].url, "http://a/5");
        assert_eq!(written.len(), 2);
    }

    #[test]
    fn test_shared_url_written_once_across_channels() {
        let mut template = Template::new();
        template.category_mut("A").extend(["CCTV1".to_string(), "CCTV1HD".to_string()]);
        let mut all = CategoryChannelMap::new();
        all.push("Online", RawChannelEntry::new("CCTV1", "http://shared/1"));
        all.push("Online", RawChannelEntry::new("CCTV1HD", "http://shared/1"));
        all.push("Online", RawChannelEntry::new("CCTV1HD", "http://hd/1"));
        let matched = match_channels(&template, &all);

        let ranker = UrlRanker::new(IpVersionPriority::Ipv4, vec![]);
        let mut written = WrittenUrlSet::new(DedupScope::Global);
        let playlist = ranker.rank_playlist(&template, &matched, &mut written);

        let channels = &playlist.categories[0].channels;
        assert_eq!(channels[0].urls.len(), 1);
        assert_eq!(channels[1].urls.len(), 1);
        assert_eq!(channels[1].urls[0].url, "http://hd/1");
    }

    #[test]
    fn test_annotated_twins_written_once() {
        let mut template = Template::new();
        template.category_mut("A").extend(["CCTV1".to_string(), "CCTV2".to_string()]);
        let mut all = CategoryChannelMap::new();
        all.push("Online", RawChannelEntry::new("CCTV1", "http://a/1$hd"));
        all.push("Online", RawChannelEntry::new("CCTV2", "http://a/1"));
        all.push("Online", RawChannelEntry::new("CCTV2", "http://a/1$backup"));
        let matched = match_channels(&template, &all);

        let ranker = UrlRanker::new(IpVersionPriority::Ipv4, vec![]);
        let mut written = WrittenUrlSet::new(DedupScope::Global);
        assert!(written.is_empty());
        let playlist = ranker.rank_playlist(&template, &matched, &mut written);

        assert_eq!(written.len(), 1);
        assert!(written.contains("A", "http://a/1"));
        let channels = &playlist.categories[0].channels;
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].urls[0].url, "http://a/1");

        let txt = TxtRenderer::new(false).render(&playlist, &[]);
        assert_eq!(txt, "A,#genre#\nCCTV1,http://a/1\n\n");
    }

    #[test]
    fn test_blacklist_applies_to_written_form() {
        let ranker = UrlRanker::new(IpVersionPriority::Ipv4, strings(&["hd"]));
        let mut written = WrittenUrlSet::new(DedupScope::Global);
        let ranked = ranker.rank_channel("A", &strings(&["http://a/1$hd"]), &mut written);
        assert_eq!(ranked[0].url, "http://a/1");
    }
}
