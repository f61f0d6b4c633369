//! Database location and per-request sessions
//!
//! A [`Database`] only knows where the store lives. Each request opens its
//! own [`Session`], which owns one configured connection and closes it when
//! dropped, on success and error paths alike.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use crate::errors::{from_rusqlite, io_error, Result};
use crate::migrations::apply_migrations;

/// How long a writer waits for another writer's lock before giving up
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A file-backed journal store
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Create the parent directory if needed and bring the schema up to date
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the file cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_dir", e))?;
        }

        let db = Self { path };
        let mut conn = db.connect()?;
        apply_migrations(&mut conn)?;
        tracing::debug!(path = %db.path.display(), "database ready");
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a session for one request
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the connection cannot be opened.
    pub fn session(&self) -> Result<Session> {
        Ok(Session {
            conn: self.connect()?,
        })
    }

    /// Run `f` inside a fresh session that is closed when `f` returns
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or `StorageUnavailable` if the session cannot be opened.
    pub fn with_session<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Session) -> Result<T>,
    {
        let mut session = self.session()?;
        f(&mut session)
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(from_rusqlite)?;
        configure(&conn)?;
        conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)
            .map_err(from_rusqlite)?;
        // WAL lets readers proceed while a writer holds the lock
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(from_rusqlite)?;
        Ok(conn)
    }
}

/// Settings every connection needs, file-backed or not
///
/// # Errors
///
/// Returns `StorageUnavailable` if a pragma cannot be set.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;
    Ok(())
}

/// One open connection to the store, scoped to a request
///
/// Implements the user, entry and tag repositories.
pub struct Session {
    pub(crate) conn: Connection,
}

impl Session {
    /// A private, migrated in-memory store (tests and throwaway use)
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if SQLite cannot allocate or migrate it.
    pub fn in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory().map_err(from_rusqlite)?;
        configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("path", &self.conn.path())
            .finish()
    }
}
