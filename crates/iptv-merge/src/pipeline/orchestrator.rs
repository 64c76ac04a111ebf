//! One complete run: template, sources, matching, ranking, output

use tracing::{info, warn};

use super::matcher::match_channels;
use super::ranking::{UrlRanker, WrittenUrlSet};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{CategoryChannelMap, RankedPlaylist, Template};
use crate::output::{PlaylistWriter, WrittenFiles};
use crate::sources::{SourceCollector, SourceFetcher, SourceReporter};
use crate::template::load_template;
use crate::utils::ChannelNameNormalizer;

/// Outcome of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sources: usize,
    pub source_entries: usize,
    pub channels_written: usize,
    pub urls_written: usize,
    pub files: WrittenFiles,
}

pub struct Pipeline<'a> {
    config: &'a Config,
    fetcher: &'a dyn SourceFetcher,
    reporter: &'a dyn SourceReporter,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        fetcher: &'a dyn SourceFetcher,
        reporter: &'a dyn SourceReporter,
    ) -> Self {
        Self {
            config,
            fetcher,
            reporter,
        }
    }

    /// Run the whole pipeline and overwrite both playlists
    pub async fn run(&self) -> AppResult<RunSummary> {
        let template = load_template(&self.config.output.template_path).await?;
        let writer = PlaylistWriter::from_config(self.config);

        let all_channels = self.collect_sources().await?;
        if all_channels.is_empty() {
            warn!("No source contributed any channels");
        }
        let playlist = self.rank(&template, &all_channels);
        let files = writer.write(&playlist).await?;

        let summary = RunSummary {
            sources: self.config.sources.urls.len(),
            source_entries: all_channels.entry_count(),
            channels_written: playlist.channel_count(),
            urls_written: playlist.url_count(),
            files,
        };
        info!(
            "Run complete: {} sources, {} source entries, {} channels, {} URLs written",
            summary.sources, summary.source_entries, summary.channels_written, summary.urls_written
        );
        Ok(summary)
    }

    /// Fetch and merge every configured source, in configured order
    pub async fn collect_sources(&self) -> AppResult<CategoryChannelMap> {
        let normalizer =
            ChannelNameNormalizer::new(self.config.matching.numbered_channel_markers.as_slice())?;
        let collector = SourceCollector::new(
            self.fetcher,
            self.reporter,
            &normalizer,
            self.config.sources.fetch_concurrency,
        );
        Ok(collector.collect_all(&self.config.sources.urls).await)
    }

    /// Project merged sources through the template and rank every channel
    pub fn rank(&self, template: &Template, all_channels: &CategoryChannelMap) -> RankedPlaylist {
        let matched = match_channels(template, all_channels);
        let ranker = UrlRanker::from_config(&self.config.matching);
        let mut written = WrittenUrlSet::new(self.config.matching.dedup_scope);
        ranker.rank_playlist(template, &matched, &mut written)
    }
}
