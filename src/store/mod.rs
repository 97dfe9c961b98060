//! SQLite-backed catalog of observed versions and check history

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,

    #[error("Invalid timestamp in database: {0}")]
    InvalidTimestamp(String),
}

/// One catalog entry: a distinct version the source has reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub version: String,
    pub release_date: Option<String>,
    pub download_url: Option<String>,
    pub first_seen_at: DateTime<Utc>,
}

/// One check: current vs latest, with the decision that was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    pub current: String,
    pub latest: Option<String>,
    pub has_update: bool,
    pub checked_at: DateTime<Utc>,
}

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open the database, creating the schema if it does not exist yet.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        info!("Opening update store at {:?}", db_path);

        let conn = Connection::open(db_path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;

        Ok(store)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;

        Ok(store)
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn create_schema(&self) -> Result<(), StoreError> {
        debug!("Creating store schema");

        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS vlc_versions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                version TEXT NOT NULL UNIQUE,
                release_date TEXT,
                download_url TEXT,
                first_seen_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS update_checks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                current_version TEXT NOT NULL,
                latest_version TEXT,
                has_update INTEGER NOT NULL,
                checked_at TEXT NOT NULL,
                notified INTEGER NOT NULL DEFAULT 0
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_checked_at ON update_checks(checked_at)",
            [],
        )?;

        Ok(())
    }

    /// Add a version to the catalog.
    ///
    /// Returns `true` if the version was new, `false` if it was already
    /// recorded; a duplicate is a no-op, not an error.
    pub fn add_version(
        &self,
        version: &str,
        release_date: Option<&str>,
        download_url: Option<&str>,
    ) -> Result<bool, StoreError> {
        let conn = self.lock_conn()?;

        let inserted = conn.execute(
            r#"
            INSERT OR IGNORE INTO vlc_versions (version, release_date, download_url, first_seen_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![version, release_date, download_url, Utc::now().to_rfc3339()],
        )?;

        Ok(inserted > 0)
    }

    /// The most recently recorded catalog version, if any.
    pub fn latest_recorded(&self) -> Result<Option<String>, StoreError> {
        let conn = self.lock_conn()?;

        let version = conn
            .query_row(
                "SELECT version FROM vlc_versions ORDER BY first_seen_at DESC, id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(version)
    }

    /// Append one check to the history.
    pub fn record_check(
        &self,
        current: &str,
        latest: Option<&str>,
        has_update: bool,
    ) -> Result<(), StoreError> {
        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            INSERT INTO update_checks (current_version, latest_version, has_update, checked_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![current, latest, has_update, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    /// Up to `limit` most recent checks, newest first.
    pub fn history(&self, limit: usize) -> Result<Vec<CheckRecord>, StoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT current_version, latest_version, has_update, checked_at
            FROM update_checks
            ORDER BY checked_at DESC, id DESC
            LIMIT ?1
            "#,
        )?;

        let records = stmt
            .query_map([limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, bool>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        records
            .into_iter()
            .map(|(current, latest, has_update, checked_at)| {
                Ok(CheckRecord {
                    current,
                    latest,
                    has_update,
                    checked_at: parse_timestamp(&checked_at)?,
                })
            })
            .collect()
    }

    /// Every catalog entry, newest first by first-seen time.
    pub fn all_versions(&self) -> Result<Vec<VersionRecord>, StoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT version, release_date, download_url, first_seen_at
            FROM vlc_versions
            ORDER BY first_seen_at DESC, id DESC
            "#,
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        records
            .into_iter()
            .map(|(version, release_date, download_url, first_seen_at)| {
                Ok(VersionRecord {
                    version,
                    release_date,
                    download_url,
                    first_seen_at: parse_timestamp(&first_seen_at)?,
                })
            })
            .collect()
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidTimestamp(text.to_string()))
}
