//! Best-effort detection of the locally installed VLC version
//!
//! Platform glue, deliberately kept apart from the comparison core: probe
//! known install locations, ask the binary for its version, and give up
//! quietly on any failure so the caller can fall back to a default.

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::DETECT_TIMEOUT_SECS;

/// Known VLC install locations, probed in order before trying PATH.
fn candidate_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from(r"C:\Program Files\VideoLAN\VLC\vlc.exe"),
        PathBuf::from(r"C:\Program Files (x86)\VideoLAN\VLC\vlc.exe"),
        PathBuf::from("/usr/bin/vlc"),
        PathBuf::from("/usr/local/bin/vlc"),
        PathBuf::from("/Applications/VLC.app/Contents/MacOS/VLC"),
    ]
}

static RELEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+\.[0-9]+\.[0-9]+)").unwrap());

/// Extract the first dotted three-integer token from command output.
pub fn extract_release(text: &str) -> Option<String> {
    RELEASE_RE.captures(text).map(|caps| caps[1].to_string())
}

/// Try to read the installed VLC version by invoking `vlc --version`.
///
/// Returns `None` when no installation is found, the process fails or
/// times out, or the output carries no version token.
pub async fn installed_version() -> Option<String> {
    let program = candidate_paths()
        .into_iter()
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from("vlc"));

    debug!("Probing VLC version via {:?}", program);

    let output = tokio::time::timeout(
        Duration::from_secs(DETECT_TIMEOUT_SECS),
        Command::new(&program).arg("--version").output(),
    )
    .await;

    let output = match output {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            warn!("Could not run {:?} --version: {}", program, e);
            return None;
        }
        Err(_) => {
            warn!("Timed out waiting for {:?} --version", program);
            return None;
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    extract_release(&stdout)
}
