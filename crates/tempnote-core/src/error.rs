//! Error types for Tempnote core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the presentation layer maps
//! lifecycle errors to a user-facing message/description pair and
//! collapses everything else to an opaque server error.

use thiserror::Error;

/// Result type alias for Tempnote operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Core error type for Tempnote operations.
#[derive(Debug, Error)]
pub enum NoteError {
    /// No note exists for the given shortlink
    #[error("Note not found")]
    NotFound,

    /// The note's expiry instant has passed; the record has been deleted
    #[error("Note has expired")]
    Expired,

    /// The note has already been consumed; the record has been deleted
    #[error("Note has already been read")]
    AlreadyRead,

    /// Supplied password missing or wrong; the record is preserved
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Stored cipher token could not be parsed or decrypted.
    /// Indicates data corruption or a key mismatch; not user-recoverable.
    #[error("Malformed cipher token")]
    MalformedToken,

    /// Encryption key rejected at construction time
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Other cryptographic failure
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl NoteError {
    /// Short user-facing message for this error.
    ///
    /// Lifecycle errors get a distinct message; internal errors collapse
    /// to a generic server error so no internal detail leaks.
    pub fn user_message(&self) -> &'static str {
        match self {
            NoteError::NotFound => "Note not found",
            NoteError::Expired => "Note has expired",
            NoteError::AlreadyRead => "Note has been already read",
            NoteError::IncorrectPassword => "Incorrect password",
            NoteError::InvalidInput(_) => "Invalid input",
            _ => "Server Error",
        }
    }

    /// Longer user-facing description paired with [`user_message`].
    ///
    /// [`user_message`]: NoteError::user_message
    pub fn user_description(&self) -> &'static str {
        match self {
            NoteError::NotFound => "Note not found on the server",
            NoteError::Expired => "Note has expired and has been deleted from the server",
            NoteError::AlreadyRead => {
                "Note has been already read and has been deleted from the server"
            }
            NoteError::IncorrectPassword => "The password you entered is incorrect.",
            NoteError::InvalidInput(_) => "The request could not be processed as given.",
            _ => "An unexpected error occurred while processing your request.",
        }
    }
}
