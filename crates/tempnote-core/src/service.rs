//! Note service: the Create, Inspect and Consume operations.
//!
//! `NoteService` orchestrates the cipher, the lifecycle evaluator and a
//! [`NoteStore`]. It owns every state-changing entry point; nothing else
//! mutates records.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::crypto::Cipher;
use crate::error::{NoteError, Result};
use crate::lifecycle::{self, NoteState};
use crate::storage::traits::NoteStore;
use crate::storage::types::{NewNote, NoteRecord};

/// Result of a successful create operation.
#[derive(Debug, Clone)]
pub struct CreatedNote {
    /// The note's unique locator
    pub shortlink: String,

    /// Shareable link built from the configured base URL
    pub share_link: String,
}

/// Result of inspecting a note without consuming it.
///
/// Inspect never releases content and never marks a note read, but it
/// does destroy records whose lifecycle state demands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectOutcome {
    /// No note for this shortlink
    NotFound,

    /// The note had expired and has now been deleted
    Expired,

    /// The note had already been read and has now been deleted
    AlreadyRead,

    /// The note exists and may be consumed
    Exists {
        /// Whether consume requires a password
        password_required: bool,
    },
}

/// Orchestrates note creation and destruction-on-read.
pub struct NoteService<S: NoteStore> {
    store: S,
    cipher: Cipher,
    base_url: String,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S, cipher: Cipher, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            store,
            cipher,
            base_url,
        }
    }

    /// Create a note: encrypt content and password independently, persist
    /// a record under a fresh shortlink, and return the shareable link.
    ///
    /// A `duration_hours` of 0 means the note never expires by time. An
    /// empty password is treated as no password.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::InvalidInput` if the content is empty.
    pub fn create(&mut self, note: NewNote) -> Result<CreatedNote> {
        if note.content.is_empty() {
            return Err(NoteError::InvalidInput(
                "Note content cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let expiry_date = if note.duration_hours > 0 {
            Some(now + Duration::hours(i64::from(note.duration_hours)))
        } else {
            None
        };
        let password = note
            .password
            .as_deref()
            .filter(|password| !password.is_empty())
            .map(|password| self.cipher.encrypt(password));

        let record = NoteRecord {
            shortlink: Uuid::new_v4().to_string(),
            content: self.cipher.encrypt(&note.content),
            created_at: now,
            expiry_date,
            read_once: note.read_once,
            password,
            read_status: false,
        };
        self.store.insert(&record)?;

        let share_link = format!("{}/note/{}", self.base_url, record.shortlink);
        Ok(CreatedNote {
            shortlink: record.shortlink,
            share_link,
        })
    }

    /// Inspect a note ahead of reading it, for gating UI.
    ///
    /// Destroys the record when its lifecycle state is destructive, but
    /// never releases content and never marks the note read.
    pub fn inspect(&mut self, shortlink: &str) -> Result<InspectOutcome> {
        let note = self.store.find_by_shortlink(shortlink)?;

        match lifecycle::classify(note.as_ref(), Utc::now()) {
            NoteState::NotFound => Ok(InspectOutcome::NotFound),
            NoteState::Expired => {
                self.store.delete_by_shortlink(shortlink)?;
                Ok(InspectOutcome::Expired)
            }
            NoteState::Consumed => {
                self.store.delete_by_shortlink(shortlink)?;
                Ok(InspectOutcome::AlreadyRead)
            }
            NoteState::PasswordRequired => Ok(InspectOutcome::Exists {
                password_required: true,
            }),
            NoteState::Readable => Ok(InspectOutcome::Exists {
                password_required: false,
            }),
        }
    }

    /// Consume a note: enforce the lifecycle and password gate, perform
    /// the single allowed mutation, and return decrypted content.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record exists
    /// - `Expired` / `AlreadyRead` after deleting the record
    /// - `IncorrectPassword` if gated and the supplied password is missing
    ///   or wrong; the record is left untouched so retries are possible
    /// - `MalformedToken` if a stored token fails to decrypt
    pub fn consume(&mut self, shortlink: &str, password: Option<&str>) -> Result<String> {
        let Some(note) = self.store.find_by_shortlink(shortlink)? else {
            return Err(NoteError::NotFound);
        };

        match lifecycle::classify(Some(&note), Utc::now()) {
            NoteState::NotFound => Err(NoteError::NotFound),
            NoteState::Expired => {
                self.store.delete_by_shortlink(shortlink)?;
                Err(NoteError::Expired)
            }
            NoteState::Consumed => {
                self.store.delete_by_shortlink(shortlink)?;
                Err(NoteError::AlreadyRead)
            }
            NoteState::PasswordRequired | NoteState::Readable => {
                // Exact string equality against the decrypted stored
                // password, matching the stored-token semantics. A missing
                // supplied password counts as a mismatch.
                if let Some(stored) = note.password.as_deref() {
                    let expected = self.cipher.decrypt(stored)?;
                    if password != Some(expected.as_str()) {
                        return Err(NoteError::IncorrectPassword);
                    }
                }

                let plaintext = self.cipher.decrypt(&note.content)?;

                // Atomic conditional mark-read: for a read-once note, only
                // the caller that observed the unread state may release
                // content; a concurrent loser gets AlreadyRead instead of
                // a second copy of the plaintext.
                let first_read = self.store.mark_read(shortlink)?;
                if note.read_once {
                    self.store.delete_by_shortlink(shortlink)?;
                    if !first_read {
                        return Err(NoteError::AlreadyRead);
                    }
                }

                Ok(plaintext)
            }
        }
    }

    /// The configured base URL, normalized without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SecretKey;
    use crate::storage::sqlite::SqliteNoteStore;

    fn service() -> NoteService<SqliteNoteStore> {
        let key = SecretKey::new("0123456789abcdef0123456789abcdef").unwrap();
        NoteService::new(
            SqliteNoteStore::in_memory().unwrap(),
            Cipher::new(key),
            "https://notes.example.com/",
        )
    }

    #[test]
    fn test_create_returns_share_link() {
        let mut service = service();
        let created = service.create(NewNote::new("hello")).unwrap();

        assert!(!created.shortlink.is_empty());
        assert_eq!(
            created.share_link,
            format!("https://notes.example.com/note/{}", created.shortlink)
        );
    }

    #[test]
    fn test_create_rejects_empty_content() {
        let mut service = service();
        let result = service.create(NewNote::new(""));
        assert!(matches!(result, Err(NoteError::InvalidInput(_))));
    }

    #[test]
    fn test_create_stores_ciphertext_only() {
        let mut service = service();
        let created = service
            .create(NewNote::new("plaintext body").with_password("hunter2"))
            .unwrap();

        let record = service
            .store
            .find_by_shortlink(&created.shortlink)
            .unwrap()
            .unwrap();
        assert!(!record.content.contains("plaintext body"));
        assert!(!record.password.as_deref().unwrap().contains("hunter2"));
    }

    #[test]
    fn test_create_treats_empty_password_as_none() {
        let mut service = service();
        let created = service
            .create(NewNote::new("hello").with_password(""))
            .unwrap();

        assert_eq!(
            service.inspect(&created.shortlink).unwrap(),
            InspectOutcome::Exists {
                password_required: false
            }
        );
    }

    #[test]
    fn test_inspect_reports_password_gate() {
        let mut service = service();
        let created = service
            .create(NewNote::new("hello").with_password("hunter2"))
            .unwrap();

        assert_eq!(
            service.inspect(&created.shortlink).unwrap(),
            InspectOutcome::Exists {
                password_required: true
            }
        );
    }

    #[test]
    fn test_inspect_does_not_consume() {
        let mut service = service();
        let created = service.create(NewNote::new("hello")).unwrap();

        service.inspect(&created.shortlink).unwrap();
        service.inspect(&created.shortlink).unwrap();
        assert_eq!(service.consume(&created.shortlink, None).unwrap(), "hello");
    }

    #[test]
    fn test_inspect_missing_note() {
        let mut service = service();
        assert_eq!(
            service.inspect("no-such-note").unwrap(),
            InspectOutcome::NotFound
        );
    }
}
