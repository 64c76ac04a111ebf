//! Channel template loading
//!
//! The template is a line-oriented file in the same shape as a TXT source:
//!
//! ```text
//! # comment
//! 央视频道,#genre#
//! CCTV1
//! CCTV2,anything after the first comma is ignored
//! 卫视频道,#genre#
//! 湖南卫视
//! ```
//!
//! Category and channel order in the file is the order of the generated
//! playlists.

use std::path::Path;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::Template;
use crate::sources::txt::{GENRE_MARKER, category_name};

/// Parse template text
pub fn parse_template(content: &str) -> Template {
    let mut template = Template::new();
    let mut current_category: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains(GENRE_MARKER) {
            let category = category_name(line);
            template.reset_category(&category);
            current_category = (!category.is_empty()).then_some(category);
        } else if let Some(category) = &current_category {
            let channel_name = line.split(',').next().unwrap_or_default().trim();
            template.category_mut(category).push(channel_name.to_string());
        }
    }

    template
}

/// Read and parse a template file
pub async fn load_template(path: impl AsRef<Path>) -> AppResult<Template> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::template(path, e))?;

    let template = parse_template(&content);
    if template.is_empty() {
        warn!("Template {} declares no categories", path.display());
    }
    info!(
        "Loaded template {} with {} categories and {} channels",
        path.display(),
        template.category_count(),
        template.channel_count()
    );
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn channels<'a>(template: &'a Template, category: &str) -> Vec<&'a str> {
        template
            .categories()
            .find(|(name, _)| *name == category)
            .map(|(_, list)| list.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_parse_template_keeps_order() {
        let template = parse_template(
            "# header comment\n央视频道,#genre#\nCCTV1\nCCTV2,ignored\n\n卫视频道,#genre#\n湖南卫视\n",
        );

        let order: Vec<&str> = template.categories().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["央视频道", "卫视频道"]);
        assert_eq!(channels(&template, "央视频道"), vec!["CCTV1", "CCTV2"]);
        assert_eq!(channels(&template, "卫视频道"), vec!["湖南卫视"]);
    }

    #[test]
    fn test_lines_before_first_category_are_ignored() {
        let template = parse_template("CCTV1\nA,#genre#\nCCTV2\n");
        assert_eq!(template.channel_count(), 1);
    }

    #[test]
    fn test_comment_lines_inside_category_are_skipped() {
        let template = parse_template("A,#genre#\n#CCTV1\nCCTV2\n");
        assert_eq!(channels(&template, "A"), vec!["CCTV2"]);
    }

    #[test]
    fn test_repeated_category_header_restarts_list() {
        let template = parse_template("A,#genre#\nCCTV1\nB,#genre#\nX\nA,#genre#\nCCTV2\n");
        let order: Vec<&str> = template.categories().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["A", "B"]);
        assert_eq!(channels(&template, "A"), vec!["CCTV2"]);
    }

    #[test]
    fn test_empty_category_name_ignores_its_channels() {
        let template = parse_template("A,#genre#\nCCTV1\n,#genre#\nOrphan\n");
        assert_eq!(channels(&template, "A"), vec!["CCTV1"]);
        assert_eq!(template.channel_count(), 1);
    }

    #[test]
    fn test_empty_category_is_kept() {
        let template = parse_template("A,#genre#\nB,#genre#\nX\n");
        assert_eq!(template.category_count(), 2);
        assert!(channels(&template, "A").is_empty());
    }

    #[tokio::test]
    async fn test_load_template_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demo.txt");
        tokio::fs::write(&path, "A,#genre#\nCCTV1\n").await.unwrap();

        let template = load_template(&path).await.unwrap();
        assert_eq!(channels(&template, "A"), vec!["CCTV1"]);
    }

    #[tokio::test]
    async fn test_missing_template_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_template(dir.path().join("missing.txt")).await.unwrap_err();
        assert!(matches!(err, AppError::Template { .. }));
    }
}
