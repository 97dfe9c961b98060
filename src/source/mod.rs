//! Fetching the latest VLC version from a remote source
//!
//! # Modules
//!
//! - [`videolan`]: scraper for the VideoLAN download page

pub mod videolan;

#[cfg(test)]
use mockall::automock;

use thiserror::Error;
use tracing::{error, warn};

/// Failure kinds for a version fetch.
///
/// Transport problems, bad statuses and a page without any recognizable
/// version number are deliberately distinct, even though the caller-facing
/// contract collapses them all to "absent".
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("No version number found on the page")]
    NoVersionFound,
}

/// Trait for obtaining the latest published VLC version
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionSource: Send + Sync {
    /// Fetches the latest version string from the source
    ///
    /// # Returns
    /// * `Ok(String)` - A dotted three-integer version such as "3.0.21"
    /// * `Err(SourceError)` - If the fetch or extraction fails
    async fn fetch_latest(&self) -> Result<String, SourceError>;
}

/// Fetch the latest version, collapsing every failure to `None`.
///
/// Callers have exactly one fallback action (report "could not check")
/// regardless of the failure cause, so the distinction between error kinds
/// goes to the operational log only.
pub async fn latest_version(source: &dyn VersionSource) -> Option<String> {
    match source.fetch_latest().await {
        Ok(version) => Some(version),
        Err(SourceError::NoVersionFound) => {
            warn!("Page fetched but no version number found");
            None
        }
        Err(e) => {
            error!("Failed to fetch latest VLC version: {}", e);
            None
        }
    }
}
