//! Fetch, parse and merge every configured source

use futures::stream::{self, StreamExt};
use tracing::info;

use super::format::parse_source;
use super::traits::{SourceFetcher, SourceReporter};
use crate::models::CategoryChannelMap;
use crate::utils::ChannelNameNormalizer;

pub struct SourceCollector<'a> {
    fetcher: &'a dyn SourceFetcher,
    reporter: &'a dyn SourceReporter,
    normalizer: &'a ChannelNameNormalizer,
    concurrency: usize,
}

impl<'a> SourceCollector<'a> {
    pub fn new(
        fetcher: &'a dyn SourceFetcher,
        reporter: &'a dyn SourceReporter,
        normalizer: &'a ChannelNameNormalizer,
        concurrency: usize,
    ) -> Self {
        Self {
            fetcher,
            reporter,
            normalizer,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetch and parse a single source; a failed fetch yields an empty map
    pub async fn collect_one(&self, url: &str) -> CategoryChannelMap {
        match self.fetcher.fetch_text(url).await {
            Ok(content) => {
                let (format, channels) = parse_source(&content, self.normalizer);
                self.reporter
                    .source_succeeded(url, format, &channels.category_names());
                channels
            }
            Err(e) => {
                self.reporter.source_failed(url, &e);
                CategoryChannelMap::new()
            }
        }
    }

    /// Fetch all sources with bounded concurrency and merge them in the
    /// order given, independent of which fetch finishes first
    pub async fn collect_all(&self, urls: &[String]) -> CategoryChannelMap {
        let mut all_channels = CategoryChannelMap::new();
        let mut results = stream::iter(urls)
            .map(|url| self.collect_one(url))
            .buffered(self.concurrency);

        while let Some(channels) = results.next().await {
            all_channels.merge(channels);
        }

        info!(
            "Collected {} entries in {} categories from {} sources",
            all_channels.entry_count(),
            all_channels.category_names().len(),
            urls.len()
        );
        all_channels
    }
}
