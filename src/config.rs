use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

// =============================================================================
// Defaults
// =============================================================================

/// VideoLAN download page scraped for the latest release
pub const VIDEOLAN_DOWNLOAD_URL: &str = "https://www.videolan.org/vlc/download-windows.html";

/// Page users are pointed at when an update is available
pub const VLC_DOWNLOAD_PAGE: &str = "https://www.videolan.org/vlc/";

/// Timeout for the outbound page fetch in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Timeout for the local `vlc --version` probe in seconds
pub const DETECT_TIMEOUT_SECS: u64 = 5;

/// Fallback when no local VLC installation can be queried
pub const DEFAULT_CURRENT_VERSION: &str = "3.0.20";

/// User-Agent sent with the page fetch; some mirrors reject non-browser agents
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Tool configuration, optionally loaded from `config.json` in the data dir.
/// Missing fields fall back to the built-in defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    /// URL of the page scraped for the latest version
    pub download_url: String,
    /// Fetch timeout in seconds
    pub fetch_timeout: u64,
    /// Current version assumed when auto-detection fails
    pub default_version: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            download_url: VIDEOLAN_DOWNLOAD_URL.to_string(),
            fetch_timeout: FETCH_TIMEOUT_SECS,
            default_version: DEFAULT_CURRENT_VERSION.to_string(),
        }
    }
}

impl CheckerConfig {
    /// Load configuration from `config.json` under the data dir.
    /// Returns defaults if the file is absent; a malformed file is
    /// reported and also falls back to defaults.
    pub fn load() -> Self {
        Self::load_from(&data_dir().join("config.json"))
    }

    fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

/// Returns the path to the data directory for vlc-check.
/// Uses $XDG_DATA_HOME/vlc-check if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/vlc-check,
/// or ./vlc-check if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the database file.
pub fn db_path() -> PathBuf {
    data_dir().join("vlc_updates.db")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("vlc-check")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result: CheckerConfig = serde_json::from_str(
            r#"{
                "fetchTimeout": 3
            }"#,
        )
        .unwrap();

        assert_eq!(result.fetch_timeout, 3);
        assert_eq!(result.download_url, VIDEOLAN_DOWNLOAD_URL);
        assert_eq!(result.default_version, DEFAULT_CURRENT_VERSION);
    }

    #[test]
    fn checker_config_from_full_object_parses_all_fields() {
        let result: CheckerConfig = serde_json::from_str(
            r#"{
                "downloadUrl": "https://example.com/vlc.html",
                "fetchTimeout": 30,
                "defaultVersion": "3.0.18"
            }"#,
        )
        .unwrap();

        assert_eq!(
            result,
            CheckerConfig {
                download_url: "https://example.com/vlc.html".to_string(),
                fetch_timeout: 30,
                default_version: "3.0.18".to_string(),
            }
        );
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let config = CheckerConfig::load_from(Path::new("/nonexistent/config.json"));
        assert_eq!(config, CheckerConfig::default());
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/vlc-check"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/vlc-check"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./vlc-check"));
    }
}
