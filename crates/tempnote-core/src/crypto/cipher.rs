//! AES-256-CTR encryption over note text.
//!
//! Every call to [`Cipher::encrypt`] draws a fresh random 16-byte IV and
//! produces an opaque token of the form `"{hex(iv)}:{hex(ciphertext)}"`.
//! [`Cipher::decrypt`] is the deterministic inverse for any token produced
//! under the same key.
//!
//! CTR mode provides confidentiality only; see the module docs in
//! [`crate::crypto`] for why no authentication tag is used.

use aes::cipher::{KeyIvInit, StreamCipher};
use aes::Aes256;
use ctr::Ctr128BE;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::crypto::key::SecretKey;
use crate::error::{NoteError, Result};

type Aes256Ctr = Ctr128BE<Aes256>;

/// IV length in bytes (one AES block).
pub const IV_LENGTH: usize = 16;

/// Delimiter between the IV and ciphertext halves of a token.
const TOKEN_DELIMITER: char = ':';

/// Symmetric cipher over opaque text, bound to a single key.
#[derive(Debug, Clone)]
pub struct Cipher {
    key: SecretKey,
}

impl Cipher {
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Encrypt plaintext into an opaque `iv:ciphertext` token.
    ///
    /// A fresh random IV is drawn per call, so encrypting the same
    /// plaintext twice yields different tokens.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let mut iv = [0u8; IV_LENGTH];
        OsRng.fill_bytes(&mut iv);

        let mut buffer = plaintext.as_bytes().to_vec();
        let mut cipher = Aes256Ctr::new(self.key.as_bytes().into(), &iv.into());
        cipher.apply_keystream(&mut buffer);

        format!(
            "{}{}{}",
            hex::encode(iv),
            TOKEN_DELIMITER,
            hex::encode(buffer)
        )
    }

    /// Decrypt a token produced by [`encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `NoteError::MalformedToken` if the token does not split
    /// into exactly two non-empty parts on `:`, if either part is not
    /// valid hex, if the IV is not 16 bytes, or if the decrypted bytes
    /// are not valid UTF-8 (the symptom of a key mismatch).
    ///
    /// [`encrypt`]: Cipher::encrypt
    pub fn decrypt(&self, token: &str) -> Result<String> {
        let parts: Vec<&str> = token.split(TOKEN_DELIMITER).collect();
        if parts.len() != 2 {
            return Err(NoteError::MalformedToken);
        }
        let (iv_hex, ciphertext_hex) = (parts[0], parts[1]);
        if iv_hex.is_empty() || ciphertext_hex.is_empty() {
            return Err(NoteError::MalformedToken);
        }

        let iv_bytes = hex::decode(iv_hex).map_err(|_| NoteError::MalformedToken)?;
        let iv: [u8; IV_LENGTH] = iv_bytes
            .try_into()
            .map_err(|_| NoteError::MalformedToken)?;
        let mut buffer = hex::decode(ciphertext_hex).map_err(|_| NoteError::MalformedToken)?;

        let mut cipher = Aes256Ctr::new(self.key.as_bytes().into(), &iv.into());
        cipher.apply_keystream(&mut buffer);

        String::from_utf8(buffer).map_err(|_| NoteError::MalformedToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cipher() -> Cipher {
        Cipher::new(SecretKey::new("0123456789abcdef0123456789abcdef").unwrap())
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let cipher = test_cipher();
        let plaintext = "Hello, World! This is secret data.";

        let token = cipher.encrypt(plaintext);
        let decrypted = cipher.decrypt(&token).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_token_format() {
        let cipher = test_cipher();
        let token = cipher.encrypt("secret");

        let parts: Vec<&str> = token.split(':').collect();
        assert_eq!(parts.len(), 2);
        // 16-byte IV hex-encoded
        assert_eq!(parts[0].len(), IV_LENGTH * 2);
        assert!(hex::decode(parts[0]).is_ok());
        assert!(hex::decode(parts[1]).is_ok());
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let cipher = test_cipher();
        let token1 = cipher.encrypt("same plaintext");
        let token2 = cipher.encrypt("same plaintext");

        assert_ne!(token1, token2);
        assert_eq!(cipher.decrypt(&token1).unwrap(), "same plaintext");
        assert_eq!(cipher.decrypt(&token2).unwrap(), "same plaintext");
    }

    #[test]
    fn test_empty_plaintext_token_rejected_on_decrypt() {
        let cipher = test_cipher();
        let token = cipher.encrypt("");
        // Ciphertext half is empty, which decrypt rejects as malformed:
        // no token with an empty half is ever considered valid.
        assert!(matches!(
            cipher.decrypt(&token),
            Err(NoteError::MalformedToken)
        ));
    }

    #[test]
    fn test_unicode_round_trip() {
        let cipher = test_cipher();
        let plaintext = "メモ 🔥 – self-destructs";
        let token = cipher.encrypt(plaintext);
        assert_eq!(cipher.decrypt(&token).unwrap(), plaintext);
    }

    #[test]
    fn test_missing_delimiter_is_malformed() {
        let cipher = test_cipher();
        let result = cipher.decrypt("deadbeefdeadbeefdeadbeefdeadbeef");
        assert!(matches!(result, Err(NoteError::MalformedToken)));
    }

    #[test]
    fn test_empty_parts_are_malformed() {
        let cipher = test_cipher();
        assert!(matches!(
            cipher.decrypt(":deadbeef"),
            Err(NoteError::MalformedToken)
        ));
        assert!(matches!(
            cipher.decrypt("deadbeef:"),
            Err(NoteError::MalformedToken)
        ));
        assert!(matches!(
            cipher.decrypt(":"),
            Err(NoteError::MalformedToken)
        ));
    }

    #[test]
    fn test_extra_delimiter_is_malformed() {
        let cipher = test_cipher();
        let result = cipher.decrypt("deadbeef:deadbeef:deadbeef");
        assert!(matches!(result, Err(NoteError::MalformedToken)));
    }

    #[test]
    fn test_non_hex_parts_are_malformed() {
        let cipher = test_cipher();
        assert!(matches!(
            cipher.decrypt("not-hex-at-all:deadbeef"),
            Err(NoteError::MalformedToken)
        ));
        assert!(matches!(
            cipher.decrypt("deadbeefdeadbeefdeadbeefdeadbeef:zzzz"),
            Err(NoteError::MalformedToken)
        ));
    }

    #[test]
    fn test_short_iv_is_malformed() {
        let cipher = test_cipher();
        // 8-byte IV instead of 16
        let result = cipher.decrypt("deadbeefdeadbeef:cafebabe");
        assert!(matches!(result, Err(NoteError::MalformedToken)));
    }

    #[test]
    fn test_wrong_key_fails_or_garbles() {
        let cipher = test_cipher();
        let other = Cipher::new(SecretKey::new("fedcba9876543210fedcba9876543210").unwrap());

        let token = cipher.encrypt("top secret contents of this note");
        // Wrong key: either invalid UTF-8 (malformed) or garbage text,
        // never the original plaintext.
        match other.decrypt(&token) {
            Ok(garbled) => assert_ne!(garbled, "top secret contents of this note"),
            Err(e) => assert!(matches!(e, NoteError::MalformedToken)),
        }
    }
}
