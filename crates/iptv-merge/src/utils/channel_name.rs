//! Channel display-name normalization
//!
//! The same numbered channel shows up across sources as `CCTV-1`, `cctv1`,
//! `CCTV 1 综合` and so on. Matching against the template is exact, so names
//! are canonicalized first: uppercased, and for numbered channel families the
//! hyphens, whitespace and CJK text are removed.

use regex::Regex;
use std::sync::OnceLock;

use crate::errors::{AppError, AppResult};

/// Characters dropped from a numbered-channel name
fn separator_pattern() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| {
        Regex::new(r"[-\s\u{4e00}-\u{9fa5}]").expect("separator pattern is valid")
    })
}

#[derive(Debug, Clone)]
pub struct ChannelNameNormalizer {
    /// `<marker>-*<digits>[whitespace|CJK]*`, absent when no markers are configured
    numbered_family: Option<Regex>,
}

impl ChannelNameNormalizer {
    /// Build a normalizer for the given channel family markers (e.g. `CCTV`)
    pub fn new<S: AsRef<str>>(markers: &[S]) -> AppResult<Self> {
        let alternatives: Vec<String> = markers
            .iter()
            .map(|m| regex::escape(&m.as_ref().trim().to_uppercase()))
            .filter(|m| !m.is_empty())
            .collect();

        if alternatives.is_empty() {
            return Ok(Self {
                numbered_family: None,
            });
        }

        let pattern = format!(
            r"(?:{})-*\d+[\s\u{{4e00}}-\u{{9fa5}}]*",
            alternatives.join("|")
        );
        let numbered_family = Regex::new(&pattern).map_err(|e| {
            AppError::configuration(format!("invalid numbered channel marker: {e}"))
        })?;

        Ok(Self {
            numbered_family: Some(numbered_family),
        })
    }

    /// Canonicalize a channel display name
    ///
    /// ```rust
    /// use iptv_merge::utils::ChannelNameNormalizer;
    ///
    /// let normalizer = ChannelNameNormalizer::new(&["CCTV"]).unwrap();
    /// assert_eq!(normalizer.normalize("CCTV-1 高清"), normalizer.normalize("cctv1"));
    /// ```
    pub fn normalize(&self, name: &str) -> String {
        let upper = name.to_uppercase();
        match &self.numbered_family {
            Some(family) if family.is_match(&upper) => {
                separator_pattern().replace_all(&upper, "").into_owned()
            }
            _ => upper,
        }
    }
}
