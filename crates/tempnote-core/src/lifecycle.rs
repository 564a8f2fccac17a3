//! Note lifecycle classification.
//!
//! [`classify`] is a pure function of a (possibly absent) note record and
//! the current time. Keeping it free of persistence makes the priority
//! ordering auditable and testable in isolation; the service layer acts on
//! the returned state (deleting, gating, or releasing content).
//!
//! States are evaluated in strict priority order:
//! NotFound > Expired > Consumed > PasswordRequired > Readable.

use chrono::{DateTime, Utc};

use crate::storage::types::NoteRecord;

/// Classification of a note at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    /// No record exists for the given shortlink
    NotFound,

    /// The expiry instant has passed; the record must be deleted
    Expired,

    /// The note has been read and may not be read again; the record must
    /// be deleted
    Consumed,

    /// The note is valid but gated: a matching password must be supplied
    /// before content is released
    PasswordRequired,

    /// The note is valid and content may be released
    Readable,
}

impl NoteState {
    /// Whether this state mandates deletion of the record.
    pub fn is_destructive(&self) -> bool {
        matches!(self, NoteState::Expired | NoteState::Consumed)
    }
}

/// Classify a note against the current time.
///
/// The `Consumed` rule: a note counts as consumed once it has been read
/// AND it is either read-once or has no expiry date. The second arm means
/// a note with neither expiry nor read-once is still single-use after its
/// first read, while a not-yet-expired note with `read_once = false` may
/// be read repeatedly until expiry. The asymmetry is intentional.
pub fn classify(note: Option<&NoteRecord>, now: DateTime<Utc>) -> NoteState {
    let Some(note) = note else {
        return NoteState::NotFound;
    };

    if let Some(expiry) = note.expiry_date {
        if now > expiry {
            return NoteState::Expired;
        }
    }

    if note.read_status && (note.read_once || note.expiry_date.is_none()) {
        return NoteState::Consumed;
    }

    if note.is_password_protected() {
        return NoteState::PasswordRequired;
    }

    NoteState::Readable
}
