/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Source retrieval defaults
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
pub const DEFAULT_USER_AGENT: &str = concat!("iptv-merge/", env!("CARGO_PKG_VERSION"));

// Matching defaults
pub const DEFAULT_NUMBERED_CHANNEL_MARKER: &str = "CCTV";

// Output defaults
pub const DEFAULT_TEMPLATE_PATH: &str = "demo.txt";
pub const DEFAULT_M3U_PATH: &str = "live.m3u";
pub const DEFAULT_TXT_PATH: &str = "live.txt";
pub const DEFAULT_LOGO_BASE_URL: &str = "https://gcore.jsdelivr.net/gh/yuanzl77/TVlogo@master/png/";
pub const DEFAULT_ANNOTATE_ROUTES: bool = false;
pub const DEFAULT_EMIT_ANNOUNCEMENTS: bool = false;

// Environment overrides
pub const ENV_PREFIX: &str = "IPTV_MERGE_";
