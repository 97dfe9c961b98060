//! VideoLAN download page scraper

use std::time::Duration;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::CheckerConfig;
use crate::source::{SourceError, VersionSource};

/// Version source scraping the VideoLAN download page.
///
/// Built once per process from a [`CheckerConfig`]; the HTTP client and the
/// extraction patterns are not mutated after construction.
pub struct VideolanSource {
    client: reqwest::Client,
    url: String,
    // Explicit "version" label, e.g. `version: 3.0.21` or `"version" "3.0.21"`
    labeled_re: Regex,
    // <h1>/<h2> blocks that may carry a bare version in their text
    heading_re: Regex,
    bare_re: Regex,
}

impl VideolanSource {
    pub fn new(config: &CheckerConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(crate::config::USER_AGENT)
                .timeout(Duration::from_secs(config.fetch_timeout))
                .build()
                .expect("Failed to create HTTP client"),
            url: config.download_url.clone(),
            labeled_re: Regex::new(r#"(?i)version\s*['":]?\s*([0-9]+\.[0-9]+\.[0-9]+)"#).unwrap(),
            heading_re: Regex::new(r"(?is)<h[12][^>]*>(.*?)</h[12]>").unwrap(),
            bare_re: Regex::new(r"([0-9]+\.[0-9]+\.[0-9]+)").unwrap(),
        }
    }

    /// Extract a version number from the page body.
    ///
    /// A labeled `version: X.Y.Z` match anywhere in the body wins over a
    /// bare `X.Y.Z` found in heading text.
    fn extract_version(&self, body: &str) -> Option<String> {
        if let Some(caps) = self.labeled_re.captures(body) {
            let version = caps[1].to_string();
            debug!("Found labeled version match: {}", version);
            return Some(version);
        }

        for heading in self.heading_re.captures_iter(body) {
            if let Some(caps) = self.bare_re.captures(&heading[1]) {
                let version = caps[1].to_string();
                debug!("Found version in heading: {}", version);
                return Some(version);
            }
        }

        None
    }
}

#[async_trait::async_trait]
impl VersionSource for VideolanSource {
    async fn fetch_latest(&self) -> Result<String, SourceError> {
        info!("Fetching VLC release info from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Download page returned status {}: {}", status, self.url);
            return Err(SourceError::Status(status));
        }

        let body = response.text().await?;

        match self.extract_version(&body) {
            Some(version) => {
                info!("Found VLC version: {}", version);
                Ok(version)
            }
            None => Err(SourceError::NoVersionFound),
        }
    }
}
