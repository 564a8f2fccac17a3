//! Cryptographic operations for Tempnote.
//!
//! This module provides the symmetric encryption boundary protecting note
//! content and passwords at rest:
//! - **AES-256-CTR**: counter-mode stream cipher, one fresh random IV per call
//! - Stored token format: `"{hex(iv)}:{hex(ciphertext)}"`
//!
//! ## Security Model
//!
//! - A single process-wide 32-byte key, validated fail-fast at startup
//! - Key material zeroized from memory on drop
//! - Ciphertext-only confidentiality: there is **no authentication tag**,
//!   so tampering is not detected. This is an inherited property of the
//!   stored token format, kept deliberately; switching to an AEAD would
//!   change the wire format of every stored note.
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the database file (content and passwords are ciphertext)
//!
//! We do NOT defend against:
//! - An attacker who can modify stored tokens (no integrity protection)
//! - Compromised OS / access to process memory

pub mod cipher;
pub mod key;

pub use cipher::Cipher;
pub use key::SecretKey;
