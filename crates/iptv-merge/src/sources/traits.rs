//! Source handler trait definitions
//!
//! Two seams separate the parsing core from the outside world:
//!
//! - [`SourceFetcher`] retrieves the raw text of one source. The default
//!   implementation is [`StandardHttpClient`](crate::utils::StandardHttpClient).
//! - [`SourceReporter`] receives the per-source outcome. The default
//!   implementation writes `tracing` events.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tracing::{error, info, warn};

use super::format::SourceFormat;
use crate::errors::{SourceError, SourceResult};
use crate::utils::url::UrlUtils;

/// Retrieves the body of a remote source as text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> SourceResult<String>;
}

/// Receives the outcome of every configured source
pub trait SourceReporter: Send + Sync {
    /// Source fetched and parsed; `categories` lists what it contributed
    fn source_succeeded(&self, url: &str, format: SourceFormat, categories: &[String]);

    /// Source could not be fetched and contributes nothing this run
    fn source_failed(&self, url: &str, error: &SourceError);
}

/// Reporter that logs outcomes through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSourceReporter;

impl SourceReporter for TracingSourceReporter {
    fn source_succeeded(&self, url: &str, format: SourceFormat, categories: &[String]) {
        let url = UrlUtils::obfuscate_credentials(url);
        if categories.is_empty() {
            warn!("Source {} fetched as {} but contained no channels", url, format);
        } else {
            info!(
                "Source {} fetched as {}, categories: {}",
                url,
                format,
                categories.join(", ")
            );
        }
    }

    fn source_failed(&self, url: &str, error: &SourceError) {
        error!(
            "Source {} failed, skipping it for this run: {}",
            UrlUtils::obfuscate_credentials(url),
            error
        );
    }
}
