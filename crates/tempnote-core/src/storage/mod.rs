//! Storage layer: the note store abstraction and its SQLite backend.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteNoteStore;
pub use traits::NoteStore;
pub use types::{NewNote, NoteRecord};
