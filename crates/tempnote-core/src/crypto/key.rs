//! The process-wide encryption key.
//!
//! Tempnote uses a single static 32-byte secret for all notes. The key is
//! loaded once at startup and rejected immediately if it has the wrong
//! length; there is no recovery path from a bad key.

use zeroize::ZeroizeOnDrop;

use crate::error::{NoteError, Result};

/// Required key length in bytes (AES-256).
pub const KEY_LENGTH: usize = 32;

/// The symmetric key protecting note content and passwords.
///
/// Key material is zeroized from memory when dropped, and the `Debug`
/// implementation never prints it.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SecretKey {
    key: [u8; KEY_LENGTH],
}

impl SecretKey {
    /// Build a key from a raw secret string.
    ///
    /// The string's UTF-8 byte representation is used directly as the key,
    /// so it must be exactly 32 bytes long.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::InvalidKey` if the secret is not exactly
    /// 32 bytes. This is a construction-time integrity gate: callers are
    /// expected to fail fast, not retry.
    pub fn new(material: &str) -> Result<Self> {
        let bytes = material.as_bytes();
        if bytes.len() != KEY_LENGTH {
            return Err(NoteError::InvalidKey(format!(
                "key must be exactly {} bytes (got {})",
                KEY_LENGTH,
                bytes.len()
            )));
        }

        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(bytes);
        Ok(Self { key })
    }

    /// Build a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// Avoid storing or logging this value. Use only for immediate
    /// encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
