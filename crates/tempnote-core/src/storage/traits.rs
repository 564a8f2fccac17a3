//! Note store trait definition.
//!
//! The `NoteStore` trait defines the persistence interface the note
//! service orchestrates against. This abstraction keeps the lifecycle and
//! read-transaction logic independent of the backing database.

use super::types::NoteRecord;
use crate::error::Result;

/// Persistence interface for note records.
///
/// All implementations must ensure:
/// - Shortlinks are unique
/// - Deletes are hard deletes
/// - `mark_read` is atomic with respect to concurrent callers
pub trait NoteStore: Send + Sync {
    /// Look up a note by its shortlink.
    ///
    /// Returns `Ok(Some(record))` if found, `Ok(None)` if not found.
    fn find_by_shortlink(&self, shortlink: &str) -> Result<Option<NoteRecord>>;

    /// Persist a new note record.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Storage` if a record with the same shortlink
    /// already exists or the write fails.
    fn insert(&mut self, note: &NoteRecord) -> Result<()>;

    /// Remove a note record. No-op if the shortlink is absent.
    fn delete_by_shortlink(&mut self, shortlink: &str) -> Result<()>;

    /// Atomically set `read_status` to true.
    ///
    /// Returns `true` iff this call observed the unread state (the
    /// false→true transition happened here). Under concurrent reads of
    /// the same record, exactly one caller sees `true`; this is what
    /// makes at-most-once delivery of read-once notes enforceable.
    fn mark_read(&mut self, shortlink: &str) -> Result<bool>;
}
