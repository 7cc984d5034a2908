//! SQLite-backed task storage.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections and apply schema migrations.
//! - Provide the only two data operations the system has: insert one task,
//!   list every task newest-first.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - `id` and `created_at` are assigned by SQLite, never by callers.
//! - Rows are never updated or deleted through this module.

mod migrations;

use crate::task::Task;
use chrono::{DateTime, Utc};
use log::{error, info};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage error for task persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Db(rusqlite::Error),
    /// The database was written by a newer binary.
    SchemaTooNew { db_version: u32, latest_supported: u32 },
    /// A persisted row failed to decode.
    InvalidRow(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "database error: {err}"),
            Self::SchemaTooNew { db_version, latest_supported } => write!(
                f,
                "database schema version {db_version} is newer than supported version {latest_supported}"
            ),
            Self::InvalidRow(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::InvalidRow(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(value)
    }
}

/// The process-wide task store.
///
/// Owns the single SQLite connection shared by all request handlers; each
/// call takes the connection lock for the duration of one statement.
pub struct TaskStore {
    conn: Mutex<Connection>,
}

impl TaskStore {
    /// Open a SQLite database file and apply all pending migrations.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        let mut conn = match Connection::open(path) {
            Ok(conn) => conn,
            Err(err) => {
                error!("event=db_open status=error mode=file error={err}");
                return Err(err.into());
            }
        };
        Self::bootstrap(&mut conn).inspect_err(|err| {
            error!("event=db_open status=error mode=file error={err}");
        })?;
        info!(
            "event=db_open status=ok mode=file duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open an in-memory SQLite database and apply all pending migrations.
    pub fn open_in_memory() -> StoreResult<Self> {
        let mut conn = Connection::open_in_memory()?;
        Self::bootstrap(&mut conn)?;
        info!("event=db_open status=ok mode=memory");
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn bootstrap(conn: &mut Connection) -> StoreResult<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        migrations::apply_migrations(conn)?;
        Ok(())
    }

    /// Insert one task. SQLite assigns the id and creation timestamp;
    /// returns the assigned id.
    pub fn insert_task(&self, text: &str) -> StoreResult<i64> {
        let conn = self.conn.lock().expect("task store mutex poisoned");
        conn.execute("INSERT INTO tasks (text) VALUES (?1)", params![text])?;
        Ok(conn.last_insert_rowid())
    }

    /// Every task, ordered by creation timestamp descending. Id descending
    /// breaks ties within one timestamp granule so a newly inserted task
    /// always sorts before older ones.
    pub fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let conn = self.conn.lock().expect("task store mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, text, created_at FROM tasks ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, text, raw_created_at) = row?;
            let created_at = parse_timestamp(&raw_created_at).ok_or_else(|| {
                StoreError::InvalidRow(format!("task {id}: bad created_at {raw_created_at:?}"))
            })?;
            tasks.push(Task { id, text, created_at });
        }
        Ok(tasks)
    }
}

/// The schema stores UTC timestamps as `%Y-%m-%dT%H:%M:%fZ`.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_id_and_timestamp() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store.insert_task("Buy milk").unwrap();
        assert_eq!(id, 1);

        let tasks = store.list_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[0].text, "Buy milk");
        // Storage-assigned timestamp is recent UTC
        let age = Utc::now() - tasks[0].created_at;
        assert!(age.num_seconds().abs() < 60);
    }

    #[test]
    fn test_list_is_newest_first() {
        let store = TaskStore::open_in_memory().unwrap();
        store.insert_task("first").unwrap();
        store.insert_task("second").unwrap();
        store.insert_task("third").unwrap();

        let tasks = store.list_tasks().unwrap();
        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_list_is_a_pure_read() {
        let store = TaskStore::open_in_memory().unwrap();
        store.insert_task("only").unwrap();
        assert_eq!(store.list_tasks().unwrap(), store.list_tasks().unwrap());
    }

    #[test]
    fn test_empty_table_lists_nothing() {
        let store = TaskStore::open_in_memory().unwrap();
        assert!(store.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn test_text_is_stored_verbatim() {
        let store = TaskStore::open_in_memory().unwrap();
        store.insert_task("  spaced out  ").unwrap();
        assert_eq!(store.list_tasks().unwrap()[0].text, "  spaced out  ");
    }

    #[test]
    fn test_open_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");
        {
            let store = TaskStore::open(&path).unwrap();
            store.insert_task("persisted").unwrap();
        }
        // Reopen: data and schema survive
        let store = TaskStore::open(&path).unwrap();
        assert_eq!(store.list_tasks().unwrap()[0].text, "persisted");
    }

    #[test]
    fn test_refuses_newer_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("PRAGMA user_version = 999;").unwrap();
        }
        match TaskStore::open(&path) {
            Err(StoreError::SchemaTooNew { db_version: 999, .. }) => {}
            Err(other) => panic!("expected SchemaTooNew, got {other}"),
            Ok(_) => panic!("expected SchemaTooNew, got an open store"),
        }
    }

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("2026-08-30T12:34:56.789Z").unwrap();
        assert_eq!(parsed.timestamp_millis() % 1000, 789);
        assert!(parse_timestamp("not a date").is_none());
    }
}
