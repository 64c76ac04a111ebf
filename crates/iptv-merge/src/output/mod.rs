//! Playlist output
//!
//! Both playlist formats are rendered from the same [`RankedPlaylist`] by
//! independent renderers, and both files are only written once everything is
//! rendered.

pub mod m3u;
pub mod txt;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{AnnouncementGroup, Config, OutputConfig};
use crate::errors::{AppError, AppResult};
use crate::models::{RankedPlaylist, RankedUrl};
use crate::utils::UrlUtils;

pub use m3u::M3uRenderer;
pub use txt::TxtRenderer;

/// URL as written to a playlist: cut at its first `$`, optionally followed by
/// a route label such as `$LR•IPV4` or `$LR•IPV6『线路2』`
pub fn output_url(ranked: &RankedUrl, channel_url_count: usize, annotate_routes: bool) -> String {
    let base = UrlUtils::strip_annotation(&ranked.url);
    if !annotate_routes {
        return base.to_string();
    }
    if channel_url_count == 1 {
        format!("{base}$LR•{}", ranked.family)
    } else {
        format!("{base}$LR•{}『线路{}』", ranked.family, ranked.rank)
    }
}

/// Fill announcement entries that have no name with `today`
pub fn resolve_announcements(
    groups: &[AnnouncementGroup],
    today: NaiveDate,
) -> Vec<AnnouncementGroup> {
    let date = today.format("%Y-%m-%d").to_string();
    groups
        .iter()
        .cloned()
        .map(|mut group| {
            for entry in &mut group.entries {
                if entry.name.is_none() {
                    entry.name = Some(date.clone());
                }
            }
            group
        })
        .collect()
}

/// Paths written by a [`PlaylistWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub m3u_path: PathBuf,
    pub txt_path: PathBuf,
}

/// Renders both playlist formats and writes them to disk
#[derive(Debug, Clone)]
pub struct PlaylistWriter {
    m3u: M3uRenderer,
    txt: TxtRenderer,
    m3u_path: PathBuf,
    txt_path: PathBuf,
    announcements: Vec<AnnouncementGroup>,
}

impl PlaylistWriter {
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            m3u: M3uRenderer::new(
                output.epg_urls.clone(),
                output.logo_base_url.clone(),
                output.annotate_routes,
            ),
            txt: TxtRenderer::new(output.annotate_routes),
            m3u_path: output.m3u_path.clone(),
            txt_path: output.txt_path.clone(),
            announcements: Vec::new(),
        }
    }

    /// Writer for a full configuration, including announcements when enabled
    pub fn from_config(config: &Config) -> Self {
        let writer = Self::new(&config.output);
        if config.output.emit_announcements {
            let today = chrono::Local::now().date_naive();
            writer.with_announcements(resolve_announcements(&config.announcements, today))
        } else {
            writer
        }
    }

    /// Announcement groups placed before the template categories
    pub fn with_announcements(mut self, announcements: Vec<AnnouncementGroup>) -> Self {
        self.announcements = announcements;
        self
    }

    /// Render both formats in memory
    pub fn render(&self, playlist: &RankedPlaylist) -> (String, String) {
        (
            self.m3u.render(playlist, &self.announcements),
            self.txt.render(playlist, &self.announcements),
        )
    }

    /// Render and fully overwrite both output files
    pub async fn write(&self, playlist: &RankedPlaylist) -> AppResult<WrittenFiles> {
        let (m3u_content, txt_content) = self.render(playlist);

        write_file(&self.m3u_path, &m3u_content).await?;
        write_file(&self.txt_path, &txt_content).await?;

        info!(
            "Wrote {} URLs for {} channels to {} and {}",
            playlist.url_count(),
            playlist.channel_count(),
            self.m3u_path.display(),
            self.txt_path.display()
        );

        Ok(WrittenFiles {
            m3u_path: self.m3u_path.clone(),
            txt_path: self.txt_path.clone(),
        })
    }
}

async fn write_file(path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::output(parent, e))?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| AppError::output(path, e))
}
