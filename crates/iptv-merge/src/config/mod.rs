use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::errors::{AppError, AppResult};

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Announcement groups, rendered only when `output.emit_announcements` is set
    #[serde(default)]
    pub announcements: Vec<AnnouncementGroup>,
}

/// Remote playlist sources, fetched in the configured order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub urls: Vec<String>,
    /// Number of sources fetched at the same time; results are still merged in order
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Channel families whose numbered names are collapsed, e.g. `CCTV-1 HD` -> `CCTV1HD`
    #[serde(default = "default_numbered_channel_markers")]
    pub numbered_channel_markers: Vec<String>,
    /// URLs containing any of these substrings are never written
    #[serde(default)]
    pub url_blacklist: Vec<String>,
    #[serde(default)]
    pub ip_version_priority: IpVersionPriority,
    #[serde(default)]
    pub dedup_scope: DedupScope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,
    #[serde(default = "default_m3u_path")]
    pub m3u_path: PathBuf,
    #[serde(default = "default_txt_path")]
    pub txt_path: PathBuf,
    /// Guide data URLs advertised in the M3U header
    #[serde(default)]
    pub epg_urls: Vec<String>,
    #[serde(default = "default_logo_base_url")]
    pub logo_base_url: String,
    /// Append `$LR•IPV4『线路N』` style route labels to written URLs
    #[serde(default = "default_annotate_routes")]
    pub annotate_routes: bool,
    #[serde(default = "default_emit_announcements")]
    pub emit_announcements: bool,
}

/// Which address family sorts first within a channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersionPriority {
    #[default]
    Ipv4,
    Ipv6,
}

/// Scope in which a URL may only be written once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupScope {
    /// A URL is written at most once in the whole playlist
    #[default]
    Global,
    /// A URL is written at most once per template category
    Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementGroup {
    pub channel: String,
    #[serde(default)]
    pub entries: Vec<AnnouncementEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementEntry {
    /// Display name; today's date is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
    #[serde(default)]
    pub logo: String,
}

fn default_fetch_concurrency() -> usize {
    DEFAULT_FETCH_CONCURRENCY
}

fn default_request_timeout() -> String {
    DEFAULT_REQUEST_TIMEOUT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_numbered_channel_markers() -> Vec<String> {
    vec![DEFAULT_NUMBERED_CHANNEL_MARKER.to_string()]
}

fn default_template_path() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_PATH)
}

fn default_m3u_path() -> PathBuf {
    PathBuf::from(DEFAULT_M3U_PATH)
}

fn default_txt_path() -> PathBuf {
    PathBuf::from(DEFAULT_TXT_PATH)
}

fn default_logo_base_url() -> String {
    DEFAULT_LOGO_BASE_URL.to_string()
}

fn default_annotate_routes() -> bool {
    DEFAULT_ANNOTATE_ROUTES
}

fn default_emit_announcements() -> bool {
    DEFAULT_EMIT_ANNOUNCEMENTS
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            fetch_concurrency: default_fetch_concurrency(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            numbered_channel_markers: default_numbered_channel_markers(),
            url_blacklist: Vec::new(),
            ip_version_priority: IpVersionPriority::default(),
            dedup_scope: DedupScope::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
            m3u_path: default_m3u_path(),
            txt_path: default_txt_path(),
            epg_urls: Vec::new(),
            logo_base_url: default_logo_base_url(),
            annotate_routes: default_annotate_routes(),
            emit_announcements: default_emit_announcements(),
        }
    }
}

impl SourcesConfig {
    /// Parsed per-request timeout
    pub fn request_timeout(&self) -> AppResult<Duration> {
        humantime::parse_duration(&self.request_timeout).map_err(|e| {
            AppError::configuration(format!(
                "sources.request_timeout '{}' is not a valid duration: {e}",
                self.request_timeout
            ))
        })
    }
}

impl Config {
    /// Load configuration from a TOML file layered over defaults and
    /// `IPTV_MERGE_*` environment variables.
    ///
    /// A missing file is created with the default configuration.
    pub fn load_from_file(config_file: impl AsRef<Path>) -> AppResult<Self> {
        let config_file = config_file.as_ref();
        if !config_file.exists() {
            let contents = toml::to_string_pretty(&Self::default())
                .map_err(|e| AppError::configuration(e.to_string()))?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file.display());
        }

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| AppError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> AppResult<()> {
        if self.sources.fetch_concurrency == 0 {
            return Err(AppError::configuration(
                "sources.fetch_concurrency must be at least 1",
            ));
        }
        self.sources.request_timeout()?;
        if self
            .matching
            .numbered_channel_markers
            .iter()
            .any(|marker| marker.trim().is_empty())
        {
            return Err(AppError::configuration(
                "matching.numbered_channel_markers must not contain empty markers",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sources.fetch_concurrency, 4);
        assert_eq!(config.matching.numbered_channel_markers, vec!["CCTV"]);
        assert_eq!(config.matching.ip_version_priority, IpVersionPriority::Ipv4);
        assert_eq!(config.matching.dedup_scope, DedupScope::Global);
        assert_eq!(config.output.m3u_path, PathBuf::from("live.m3u"));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from_file(&path).unwrap();

        assert!(path.exists());
        assert!(config.sources.urls.is_empty());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[sources]"));
    }

    #[test]
    fn test_load_reads_toml_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[sources]
urls = ["http://a.example/list.m3u", "http://b.example/list.txt"]
fetch_concurrency = 1

[matching]
url_blacklist = ["bad.example"]
ip_version_priority = "ipv6"
dedup_scope = "category"

[output]
epg_urls = ["http://epg.example/e.xml"]

[[announcements]]
channel = "Updates"
entries = [{ url = "http://a.example/notice.mp4", logo = "http://a.example/l.png" }]
"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();

        assert_eq!(config.sources.urls.len(), 2);
        assert_eq!(config.sources.fetch_concurrency, 1);
        assert_eq!(config.sources.request_timeout, "30s");
        assert_eq!(config.matching.url_blacklist, vec!["bad.example"]);
        assert_eq!(config.matching.ip_version_priority, IpVersionPriority::Ipv6);
        assert_eq!(config.matching.dedup_scope, DedupScope::Category);
        assert_eq!(config.output.epg_urls, vec!["http://epg.example/e.xml"]);
        assert_eq!(config.announcements[0].entries[0].name, None);
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.sources.fetch_concurrency = 0;
        assert!(matches!(
            config.validate(),
            Err(AppError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_timeout() {
        let mut config = Config::default();
        config.sources.request_timeout = "soon".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout"));
    }

    #[test]
    fn test_request_timeout_parses_humantime() {
        let mut config = SourcesConfig::default();
        config.request_timeout = "1m 30s".to_string();
        assert_eq!(config.request_timeout().unwrap(), Duration::from_secs(90));
    }
}
