//! Command implementations behind the CLI flags
//!
//! Each function takes its collaborators explicitly so the flows can be
//! exercised with a mocked version source and an in-memory store. Console
//! output goes to stdout; diagnostics go to the tracing log.

use tracing::{error, info, warn};

use crate::config::{CheckerConfig, VLC_DOWNLOAD_PAGE};
use crate::detect;
use crate::source::{self, VersionSource};
use crate::store::{Store, StoreError};
use crate::version::evaluator::evaluate;

/// How many history rows `--history` prints
pub const HISTORY_LIMIT: usize = 20;

/// Resolve the current version: operator override, then the installed
/// binary, then the configured default.
pub async fn resolve_current(config: &CheckerConfig, override_version: Option<&str>) -> String {
    if let Some(version) = override_version {
        return version.to_string();
    }

    match detect::installed_version().await {
        Some(version) => version,
        None => {
            println!(
                "VLC not found. Using default version: {}",
                config.default_version
            );
            config.default_version.clone()
        }
    }
}

/// Run one update check and report the outcome.
///
/// Returns `false` when the version source could not be reached at all,
/// which the entry point maps to a non-zero exit code. A failed store
/// write is reported but does not change the outcome.
pub async fn run_check(
    store: &Store,
    source: &dyn VersionSource,
    current_version: &str,
) -> bool {
    println!("\nVLC Update Checker v{}", env!("CARGO_PKG_VERSION"));
    println!("Current version: {}", current_version);
    println!("{}", "-".repeat(40));

    let Some(latest_version) = source::latest_version(source).await else {
        println!("\n✗ Could not contact VideoLAN to check for updates.");
        println!("  Try again later.");
        return false;
    };

    if let Err(e) = store.add_version(&latest_version, None, None) {
        report_store_failure("record version", &e);
    }

    let evaluation = evaluate(current_version, Some(&latest_version));
    info!(
        "Checked {} against {}: has_update={}",
        current_version, latest_version, evaluation.has_update
    );

    if let Err(e) = store.record_check(current_version, Some(&latest_version), evaluation.has_update)
    {
        report_store_failure("record check", &e);
    }

    match evaluation.candidate {
        Some(candidate) => {
            println!("\n✓ UPDATE AVAILABLE!");
            println!("  New version: {}", candidate);
            println!("\n  Download from: {}", VLC_DOWNLOAD_PAGE);
        }
        None => {
            println!("\n✗ You are already on the latest version ({})", latest_version);
        }
    }

    true
}

/// Print up to [`HISTORY_LIMIT`] most recent checks, newest first.
pub fn run_history(store: &Store) -> Result<(), StoreError> {
    println!("\n=== Update Check History ===\n");

    let history = store.history(HISTORY_LIMIT)?;
    if history.is_empty() {
        println!("No history found.");
        return Ok(());
    }

    for (i, entry) in history.iter().enumerate() {
        let status = if entry.has_update {
            "✓ Update available"
        } else {
            "✗ Latest version"
        };
        println!("{}. [{}]", i + 1, entry.checked_at.format("%Y-%m-%d %H:%M:%S"));
        println!(
            "   Current: {} -> Latest: {}",
            entry.current,
            entry.latest.as_deref().unwrap_or("unknown")
        );
        println!("   {}\n", status);
    }

    Ok(())
}

/// Print every catalog entry, newest first.
pub fn run_list_versions(store: &Store) -> Result<(), StoreError> {
    println!("\n=== Recorded VLC Versions ===\n");

    let versions = store.all_versions()?;
    if versions.is_empty() {
        println!("No versions recorded.");
        return Ok(());
    }

    for record in &versions {
        println!("Version: {}", record.version);
        if let Some(release_date) = &record.release_date {
            println!("  Release: {}", release_date);
        }
        if let Some(url) = &record.download_url {
            println!("  URL: {}", url);
        }
        println!(
            "  First seen: {}\n",
            record.first_seen_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}

fn report_store_failure(action: &str, e: &StoreError) {
    error!("Failed to {}: {}", action, e);
    println!("Warning: could not {} ({})", action, e);
    warn!("Continuing without persistence for this check");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MockVersionSource, SourceError};

    #[tokio::test]
    async fn run_check_records_catalog_and_history_on_success() {
        let store = Store::open_in_memory().unwrap();
        let mut source = MockVersionSource::new();
        source
            .expect_fetch_latest()
            .returning(|| Ok("3.0.21".to_string()));

        let reachable = run_check(&store, &source, "3.0.20").await;

        assert!(reachable);
        assert_eq!(store.latest_recorded().unwrap(), Some("3.0.21".to_string()));

        let history = store.history(HISTORY_LIMIT).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].current, "3.0.20");
        assert_eq!(history[0].latest, Some("3.0.21".to_string()));
        assert!(history[0].has_update);
    }

    #[tokio::test]
    async fn run_check_records_no_update_when_already_latest() {
        let store = Store::open_in_memory().unwrap();
        let mut source = MockVersionSource::new();
        source
            .expect_fetch_latest()
            .returning(|| Ok("3.0.20".to_string()));

        let reachable = run_check(&store, &source, "3.0.20").await;

        assert!(reachable);
        let history = store.history(HISTORY_LIMIT).unwrap();
        assert_eq!(history.len(), 1);
        assert!(!history[0].has_update);
    }

    #[tokio::test]
    async fn run_check_reports_unreachable_source_without_recording() {
        let store = Store::open_in_memory().unwrap();
        let mut source = MockVersionSource::new();
        source
            .expect_fetch_latest()
            .returning(|| Err(SourceError::NoVersionFound));

        let reachable = run_check(&store, &source, "3.0.20").await;

        assert!(!reachable);
        assert_eq!(store.latest_recorded().unwrap(), None);
        assert!(store.history(HISTORY_LIMIT).unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolve_current_prefers_operator_override() {
        let config = CheckerConfig::default();

        let current = resolve_current(&config, Some("3.0.18")).await;

        assert_eq!(current, "3.0.18");
    }

    #[test]
    fn run_history_handles_empty_store() {
        let store = Store::open_in_memory().unwrap();
        run_history(&store).unwrap();
    }

    #[test]
    fn run_list_versions_handles_empty_store() {
        let store = Store::open_in_memory().unwrap();
        run_list_versions(&store).unwrap();
    }
}
