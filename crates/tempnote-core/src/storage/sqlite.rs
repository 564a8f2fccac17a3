//! SQLite note store.
//!
//! Notes are stored in a single `notes` table. Content and password
//! columns hold the opaque cipher tokens; the database file itself is not
//! additionally encrypted.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};

use super::traits::NoteStore;
use super::types::NoteRecord;
use crate::error::{NoteError, Result};

/// SQLite-backed note store.
pub struct SqliteNoteStore {
    #[allow(dead_code)]
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteNoteStore {
    /// Create a new note database at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Storage` if the file already exists, or an
    /// SQLite error if the schema cannot be initialized.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(NoteError::Storage(
                "Note database already exists".to_string(),
            ));
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open an existing note database.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Storage` if the file does not exist.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NoteError::Storage(format!(
                "Note database not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store. Useful for tests and ephemeral setups.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                shortlink TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                expiry_date TEXT,
                read_once INTEGER NOT NULL DEFAULT 1,
                password TEXT,
                read_status INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )?;
        Ok(())
    }
}

/// Raw row data from the notes table, before parsing into domain types.
#[derive(Debug)]
struct NoteRow {
    shortlink: String,
    content: String,
    created_at: String,
    expiry_date: Option<String>,
    read_once: bool,
    password: Option<String>,
    read_status: bool,
}

impl TryFrom<NoteRow> for NoteRecord {
    type Error = NoteError;

    fn try_from(row: NoteRow) -> Result<Self> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| NoteError::Storage(format!("Invalid created_at timestamp: {}", e)))?
            .with_timezone(&Utc);
        let expiry_date = row
            .expiry_date
            .as_deref()
            .map(|value| {
                DateTime::parse_from_rfc3339(value)
                    .map(|parsed| parsed.with_timezone(&Utc))
                    .map_err(|e| NoteError::Storage(format!("Invalid expiry timestamp: {}", e)))
            })
            .transpose()?;

        Ok(NoteRecord {
            shortlink: row.shortlink,
            content: row.content,
            created_at,
            expiry_date,
            read_once: row.read_once,
            password: row.password,
            read_status: row.read_status,
        })
    }
}

impl NoteStore for SqliteNoteStore {
    fn find_by_shortlink(&self, shortlink: &str) -> Result<Option<NoteRecord>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                r#"
                SELECT shortlink, content, created_at, expiry_date, read_once, password, read_status
                FROM notes
                WHERE shortlink = ?
                "#,
                [shortlink],
                |row| {
                    Ok(NoteRow {
                        shortlink: row.get(0)?,
                        content: row.get(1)?,
                        created_at: row.get(2)?,
                        expiry_date: row.get(3)?,
                        read_once: row.get(4)?,
                        password: row.get(5)?,
                        read_status: row.get(6)?,
                    })
                },
            )
            .optional()?;

        row.map(NoteRecord::try_from).transpose()
    }

    fn insert(&mut self, note: &NoteRecord) -> Result<()> {
        self.conn.lock().unwrap().execute(
            r#"
            INSERT INTO notes (
                shortlink,
                content,
                created_at,
                expiry_date,
                read_once,
                password,
                read_status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            (
                &note.shortlink,
                &note.content,
                note.created_at.to_rfc3339(),
                note.expiry_date.map(|date| date.to_rfc3339()),
                note.read_once,
                &note.password,
                note.read_status,
            ),
        )?;
        Ok(())
    }

    fn delete_by_shortlink(&mut self, shortlink: &str) -> Result<()> {
        self.conn
            .lock()
            .unwrap()
            .execute("DELETE FROM notes WHERE shortlink = ?", [shortlink])?;
        Ok(())
    }

    fn mark_read(&mut self, shortlink: &str) -> Result<bool> {
        // Conditional update: only one caller can take the false→true
        // transition, which is what gives read-once notes at-most-once
        // release.
        let changed = self.conn.lock().unwrap().execute(
            "UPDATE notes SET read_status = 1 WHERE shortlink = ? AND read_status = 0",
            [shortlink],
        )?;
        Ok(changed == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note(shortlink: &str) -> NoteRecord {
        NoteRecord {
            shortlink: shortlink.to_string(),
            content: "deadbeefdeadbeefdeadbeefdeadbeef:cafebabe".to_string(),
            created_at: Utc::now(),
            expiry_date: None,
            read_once: true,
            password: None,
            read_status: false,
        }
    }

    #[test]
    fn test_insert_and_find_round_trip() {
        let mut store = SqliteNoteStore::in_memory().unwrap();
        let note = sample_note("abc-123");

        store.insert(&note).unwrap();
        let found = store.find_by_shortlink("abc-123").unwrap().unwrap();

        assert_eq!(found.shortlink, note.shortlink);
        assert_eq!(found.content, note.content);
        assert!(found.read_once);
        assert!(!found.read_status);
        assert!(found.expiry_date.is_none());
        assert!(found.password.is_none());
    }

    #[test]
    fn test_find_absent_returns_none() {
        let store = SqliteNoteStore::in_memory().unwrap();
        assert!(store.find_by_shortlink("missing").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_shortlink_rejected() {
        let mut store = SqliteNoteStore::in_memory().unwrap();
        let note = sample_note("dup");

        store.insert(&note).unwrap();
        assert!(store.insert(&note).is_err());
    }

    #[test]
    fn test_expiry_date_round_trip() {
        let mut store = SqliteNoteStore::in_memory().unwrap();
        let mut note = sample_note("expiring");
        let expiry = Utc::now() + chrono::Duration::hours(2);
        note.expiry_date = Some(expiry);

        store.insert(&note).unwrap();
        let found = store.find_by_shortlink("expiring").unwrap().unwrap();

        assert_eq!(found.expiry_date.unwrap(), expiry);
    }

    #[test]
    fn test_delete_is_hard_and_idempotent() {
        let mut store = SqliteNoteStore::in_memory().unwrap();
        store.insert(&sample_note("gone")).unwrap();

        store.delete_by_shortlink("gone").unwrap();
        assert!(store.find_by_shortlink("gone").unwrap().is_none());

        // Deleting an absent record is a no-op, not an error.
        store.delete_by_shortlink("gone").unwrap();
    }

    #[test]
    fn test_mark_read_transitions_exactly_once() {
        let mut store = SqliteNoteStore::in_memory().unwrap();
        store.insert(&sample_note("once")).unwrap();

        assert!(store.mark_read("once").unwrap());
        assert!(!store.mark_read("once").unwrap());

        let found = store.find_by_shortlink("once").unwrap().unwrap();
        assert!(found.read_status);
    }

    #[test]
    fn test_mark_read_absent_returns_false() {
        let mut store = SqliteNoteStore::in_memory().unwrap();
        assert!(!store.mark_read("missing").unwrap());
    }
}
