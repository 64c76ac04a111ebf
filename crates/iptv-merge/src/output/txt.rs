//! Delimited-text playlist rendering

use std::fmt::Write;

use super::output_url;
use crate::config::AnnouncementGroup;
use crate::models::RankedPlaylist;
use crate::sources::txt::GENRE_MARKER;

#[derive(Debug, Clone)]
pub struct TxtRenderer {
    annotate_routes: bool,
}

impl TxtRenderer {
    pub fn new(annotate_routes: bool) -> Self {
        Self { annotate_routes }
    }

    /// Every category gets its header line, even without channels; the file
    /// ends with one blank line
    pub fn render(&self, playlist: &RankedPlaylist, announcements: &[AnnouncementGroup]) -> String {
        let mut txt = String::new();

        for group in announcements {
            let _ = writeln!(txt, "{},{}", group.channel, GENRE_MARKER);
            for entry in &group.entries {
                let _ = writeln!(
                    txt,
                    "{},{}",
                    entry.name.as_deref().unwrap_or_default(),
                    entry.url
                );
            }
        }

        for category in &playlist.categories {
            let _ = writeln!(txt, "{},{}", category.name, GENRE_MARKER);
            for channel in &category.channels {
                let total = channel.urls.len();
                for ranked in &channel.urls {
                    let _ = writeln!(
                        txt,
                        "{},{}",
                        channel.name,
                        output_url(ranked, total, self.annotate_routes)
                    );
                }
            }
        }

        txt.push('\n');
        txt
    }
}
