use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::{AppError, AppResult, SourceError, SourceResult};
use crate::sources::SourceFetcher;
use crate::utils::url::UrlUtils;

/// Default [`SourceFetcher`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct StandardHttpClient {
    client: Client,
}

impl StandardHttpClient {
    /// Create new HTTP client with a total per-request timeout
    pub fn new(timeout: Duration, user_agent: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for StandardHttpClient {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        let display_url = UrlUtils::obfuscate_credentials(url);
        debug!("Fetching text content from: {}", display_url);

        let response = self.client.get(url).send().await.map_err(|e| {
            SourceError::transport(&display_url, UrlUtils::obfuscate_credentials(&e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                url: display_url,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| SourceError::Body {
            url: display_url.clone(),
            message: e.to_string(),
        })?;

        // Invalid UTF-8 bytes become U+FFFD instead of failing the source
        let content = String::from_utf8_lossy(&bytes).into_owned();
        debug!(
            "Fetched {} bytes ({} characters) from {}",
            bytes.len(),
            content.chars().count(),
            display_url
        );
        Ok(content)
    }
}
