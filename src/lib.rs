//! vlc-check: update checker for VLC Media Player
//!
//! Scrapes the VideoLAN download page for the latest release, compares it
//! against the locally installed (or operator-supplied) version, and records
//! every check in a local SQLite store.
//!
//! # Modules
//!
//! - [`app`]: command flows behind the CLI flags
//! - [`config`]: defaults, optional `config.json`, data-dir paths
//! - [`detect`]: best-effort probe of the installed VLC version
//! - [`source`]: `VersionSource` trait and the VideoLAN page scraper
//! - [`store`]: SQLite-backed version catalog and check history
//! - [`version`]: pure release comparison and update evaluation

pub mod app;
pub mod config;
pub mod detect;
pub mod source;
pub mod store;
pub mod version;
