//! AES-256-GCM encryption for provider tokens at rest.
//!
//! Stored form is `nonce (12 bytes) || ciphertext`. The key is the SHA-256
//! digest of the configured secret, so any non-empty secret yields a valid
//! 32-byte key.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;

use crate::error::CoreError;
use crate::hashing::sha256_bytes;

const NONCE_LEN: usize = 12;

#[derive(Clone)]
pub struct TokenCipher {
    key: [u8; 32],
}

impl std::fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenCipher(..)")
    }
}

impl TokenCipher {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            key: sha256_bytes(secret.as_bytes()),
        }
    }

    fn cipher(&self) -> Result<Aes256Gcm, CoreError> {
        Aes256Gcm::new_from_slice(&self.key).map_err(|e| CoreError::Internal(e.to_string()))
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>, CoreError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from(nonce_bytes);

        let ciphertext = self
            .cipher()?
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| CoreError::Internal(format!("Token encryption failed: {e}")))?;

        let mut out = nonce_bytes.to_vec();
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<String, CoreError> {
        if data.len() <= NONCE_LEN {
            return Err(CoreError::Internal("Encrypted token is too short".into()));
        }
        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
        let nonce_array: [u8; NONCE_LEN] = nonce_bytes
            .try_into()
            .map_err(|_| CoreError::Internal("Invalid nonce length".into()))?;
        let plaintext = self
            .cipher()?
            .decrypt(&Nonce::from(nonce_array), ciphertext)
            .map_err(|e| CoreError::Internal(format!("Token decryption failed: {e}")))?;
        String::from_utf8(plaintext).map_err(|e| CoreError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn decrypts_what_it_encrypts() {
        let cipher = TokenCipher::from_secret("test-secret");
        let sealed = cipher.encrypt("gho_abc123").unwrap();
        assert_ne!(&sealed[NONCE_LEN..], b"gho_abc123");
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "gho_abc123");
    }

    #[test]
    fn nonces_differ_between_calls() {
        let cipher = TokenCipher::from_secret("test-secret");
        let a = cipher.encrypt("same").unwrap();
        let b = cipher.encrypt("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails() {
        let sealed = TokenCipher::from_secret("one").encrypt("token").unwrap();
        assert_matches!(
            TokenCipher::from_secret("two").decrypt(&sealed),
            Err(CoreError::Internal(_))
        );
    }

    #[test]
    fn short_input_fails() {
        let cipher = TokenCipher::from_secret("k");
        assert_matches!(cipher.decrypt(&[0u8; 5]), Err(CoreError::Internal(_)));
    }
}
