//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted note.
///
/// All fields are fixed at creation except `read_status`, which moves
/// false→true exactly once on the first successful content retrieval and
/// is never reset. There is no other update operation and no versioning:
/// a record is either present-and-valid or absent (hard delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Unique URL-safe identifier; the sole external locator
    pub shortlink: String,

    /// Ciphertext token produced by `Cipher::encrypt`; never plaintext
    pub content: String,

    /// When this note was created
    pub created_at: DateTime<Utc>,

    /// If set, the note is invalid strictly after this instant.
    /// If absent, the note never expires by time.
    pub expiry_date: Option<DateTime<Utc>>,

    /// If true, the first successful read destroys the record
    pub read_once: bool,

    /// Optional ciphertext token gating reads; absent means no gating
    pub password: Option<String>,

    /// Whether the note has been read
    pub read_status: bool,
}

impl NoteRecord {
    /// Whether a reader must supply a password before content is released.
    pub fn is_password_protected(&self) -> bool {
        self.password.is_some()
    }
}

/// Builder for creating new notes.
///
/// Content and password are carried in plaintext here; the service
/// encrypts both independently before anything is persisted.
#[derive(Debug, Clone)]
pub struct NewNote {
    /// Raw note body
    pub content: String,

    /// Hours until expiry; 0 means the note never expires by time
    pub duration_hours: u32,

    /// Optional raw password gating reads
    pub password: Option<String>,

    /// Destroy after first read (the default)
    pub read_once: bool,
}

impl NewNote {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            duration_hours: 0,
            password: None,
            read_once: true,
        }
    }

    pub fn expires_in_hours(mut self, hours: u32) -> Self {
        self.duration_hours = hours;
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_read_once(mut self, read_once: bool) -> Self {
        self.read_once = read_once;
        self
    }
}
