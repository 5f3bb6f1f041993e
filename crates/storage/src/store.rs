//! The durable tracking store: a single local SQLite table, one row per
//! tracked job.

use crate::error::StoreError;
use rerun_core::{Cluster, JobId, JobSpec, State};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Conflict policy for a batch write. Applies to every row in the batch
/// uniformly; there is no per-row override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Replace `state, cluster, queue, project, jobscript_path,
    /// experiment_path, modified_time` on an existing row.
    Update,
    /// Leave the existing row untouched.
    Skip,
    /// Fail the entire batch if any row already exists.
    Throw,
}

/// Single-writer, local persistent table of tracked jobs. Opened lazily
/// and reused for the process lifetime.
pub struct TrackingStore {
    conn: Connection,
}

impl TrackingStore {
    /// Open (or create) the tracking database at `path`, creating the
    /// `jobs` table if absent. Clients must tolerate older schemas
    /// missing the `comment` and `cluster` columns; this constructor
    /// always creates the current schema, but the query helpers below
    /// fall back gracefully regardless.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// An in-memory store, used by tests that don't need a file on disk.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;
             CREATE TABLE IF NOT EXISTS jobs (
                 id               TEXT PRIMARY KEY,
                 state            TEXT NOT NULL,
                 cluster          TEXT,
                 queue            TEXT,
                 project          TEXT,
                 jobscript_path   TEXT,
                 experiment_path  TEXT NOT NULL,
                 name             TEXT NOT NULL DEFAULT '',
                 comment          TEXT,
                 modified_time    TEXT NOT NULL
             );",
        )?;
        Ok(Self { conn })
    }

    /// Insert or update a batch of [`JobSpec`]s under one conflict
    /// policy. The batch is transactional: a `Throw` conflict rolls back
    /// the entire call, not just the offending row.
    pub fn upsert(&mut self, specs: &[JobSpec], on_conflict: OnConflict) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        for spec in specs {
            let exists: bool = tx
                .query_row("SELECT 1 FROM jobs WHERE id = ?1", params![spec.id.to_string()], |_| Ok(()))
                .optional()?
                .is_some();

            if exists {
                match on_conflict {
                    OnConflict::Skip => continue,
                    OnConflict::Throw => return Err(StoreError::Conflict(spec.id)),
                    OnConflict::Update => {}
                }
            }

            tx.execute(
                "INSERT INTO jobs (id, state, cluster, queue, project, jobscript_path, experiment_path, name, comment, modified_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(id) DO UPDATE SET
                     state = excluded.state,
                     cluster = excluded.cluster,
                     queue = excluded.queue,
                     project = excluded.project,
                     jobscript_path = excluded.jobscript_path,
                     experiment_path = excluded.experiment_path,
                     name = excluded.name,
                     modified_time = excluded.modified_time",
                params![
                    spec.id.to_string(),
                    spec.state.as_str(),
                    spec.cluster.as_str(),
                    spec.queue,
                    spec.project,
                    spec.jobscript_path,
                    spec.experiment_path,
                    spec.name,
                    spec.comment,
                    spec.modified_time.to_rfc3339(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Conditional column write: `state` (and optionally `comment`), plus
    /// `modified_time = now()`. A no-op if `id` has no row (the caller —
    /// typically the missing-alerts pass — has already confirmed the row
    /// exists).
    pub fn update_state(&self, id: JobId, state: State, comment: Option<&str>) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE jobs SET state = ?2, comment = COALESCE(?3, comment), modified_time = ?4 WHERE id = ?1",
            params![id.to_string(), state.as_str(), comment, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Remove a row from the durable store.
    pub fn pop(&self, id: JobId) -> Result<Option<JobSpec>, StoreError> {
        let existing = self.get(id)?;
        if existing.is_some() {
            self.conn.execute("DELETE FROM jobs WHERE id = ?1", params![id.to_string()])?;
        }
        Ok(existing)
    }

    pub fn get(&self, id: JobId) -> Result<Option<JobSpec>, StoreError> {
        self.conn
            .query_row("SELECT * FROM jobs WHERE id = ?1", params![id.to_string()], row_to_spec)
            .optional()
            .map_err(StoreError::from)
    }

    /// All rows currently in the store, in no particular guaranteed
    /// order beyond SQLite's natural rowid order (insertion order, absent
    /// intervening deletes).
    pub fn all(&self) -> Result<Vec<JobSpec>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT * FROM jobs ORDER BY rowid")?;
        let rows = stmt.query_map([], row_to_spec)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }
}

/// Column access tolerant of an older schema missing `comment`/`cluster`:
/// falls back to `None` / `Unknown` rather than erroring.
fn row_to_spec(row: &rusqlite::Row<'_>) -> rusqlite::Result<JobSpec> {
    let id_str: String = row.get("id")?;
    let id = JobId::from_string(&id_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))?;

    let state_str: String = row.get("state")?;
    let state = State::from_str_value(&state_str).unwrap_or(State::Unknown);

    let cluster = row
        .get::<_, Option<String>>("cluster")
        .unwrap_or(None)
        .map(|s| Cluster::from_str_or_unknown(&s))
        .unwrap_or(Cluster::Unknown);

    let modified_time_str: String = row.get("modified_time")?;
    let modified_time = chrono::DateTime::parse_from_rfc3339(&modified_time_str)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now());

    Ok(JobSpec {
        id,
        name: row.get::<_, Option<String>>("name").unwrap_or(None).unwrap_or_default(),
        experiment_path: row.get("experiment_path")?,
        cluster,
        state,
        modified_time,
        comment: row.get::<_, Option<String>>("comment").unwrap_or(None),
        queue: row.get("queue")?,
        project: row.get("project")?,
        jobscript_path: row.get("jobscript_path")?,
    })
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
