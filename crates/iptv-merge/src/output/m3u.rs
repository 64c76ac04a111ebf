//! M3U playlist rendering

use std::fmt::Write;

use super::output_url;
use crate::config::AnnouncementGroup;
use crate::models::RankedPlaylist;

#[derive(Debug, Clone)]
pub struct M3uRenderer {
    epg_urls: Vec<String>,
    logo_base_url: String,
    annotate_routes: bool,
}

impl M3uRenderer {
    pub fn new(epg_urls: Vec<String>, logo_base_url: String, annotate_routes: bool) -> Self {
        Self {
            epg_urls,
            logo_base_url,
            annotate_routes,
        }
    }

    /// `#EXTM3U x-tvg-url="<epg1>","<epg2>"`
    fn header(&self) -> String {
        let guides: Vec<String> = self.epg_urls.iter().map(|url| format!("\"{url}\"")).collect();
        format!("#EXTM3U x-tvg-url={}\n", guides.join(","))
    }

    pub fn render(&self, playlist: &RankedPlaylist, announcements: &[AnnouncementGroup]) -> String {
        let mut m3u = self.header();

        for group in announcements {
            for entry in &group.entries {
                let name = entry.name.as_deref().unwrap_or_default();
                let _ = writeln!(
                    m3u,
                    "#EXTINF:-1 tvg-id=\"1\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}",
                    name, entry.logo, group.channel, name
                );
                let _ = writeln!(m3u, "{}", entry.url);
            }
        }

        for category in &playlist.categories {
            for channel in &category.channels {
                let total = channel.urls.len();
                for ranked in &channel.urls {
                    let _ = writeln!(
                        m3u,
                        "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}{}.png\" group-title=\"{}\",{}",
                        ranked.rank,
                        channel.name,
                        self.logo_base_url,
                        channel.name,
                        category.name,
                        channel.name
                    );
                    let _ = writeln!(m3u, "{}", output_url(ranked, total, self.annotate_routes));
                }
            }
        }

        m3u
    }
}
