//! # Tempnote Core
//!
//! Core library for Tempnote - encrypted, self-destructing text notes
//! addressed by random shortlinks.
//!
//! This crate provides the note lifecycle state machine, the encryption
//! boundary, and the storage abstractions independent of any transport or
//! user interface.
//!
//! ## Architecture
//!
//! - **crypto**: Symmetric cipher and key handling
//! - **storage**: Note store trait and SQLite implementation
//! - **lifecycle**: Pure classification of a note against the current time
//! - **service**: Create / Inspect / Consume operations
//!
//! ## Destruction rules
//!
//! A note is hard-deleted (never soft-deleted) as soon as any of these
//! holds at the moment it is touched:
//!
//! - its expiry instant has passed,
//! - it is read-once and has been read,
//! - it has no expiry, is not read-once, and has been read once.
//!
//! The last rule is deliberately asymmetric with expiring notes, which may
//! be re-read until expiry. See [`lifecycle`] for the exact ordering.

pub mod crypto;
pub mod error;
pub mod lifecycle;
pub mod service;
pub mod storage;

pub use crypto::{Cipher, SecretKey};
pub use error::{NoteError, Result};
pub use lifecycle::NoteState;
pub use service::{CreatedNote, InspectOutcome, NoteService};
pub use storage::{NewNote, NoteRecord, NoteStore, SqliteNoteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
