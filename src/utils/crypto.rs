//! Crypto - API Token Encryption at Rest
//!
//! The backend bearer token stored in the local config is encrypted with
//! AES-256-GCM and Base64-encoded. Each encryption uses a fresh random
//! nonce; the stored string is `[nonce (12 bytes)][ciphertext]` in Base64.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
    Aes256Gcm,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::{Error, Result};

/// Master encryption key for AES-256-GCM cipher.
///
/// WARNING: In production this should come from the OS keychain or an
/// environment variable rather than the binary.
const MASTER_KEY: &[u8; 32] = b"CtrAdminGuiTokenKey2026Platform!";

/// Encrypt a plaintext token for storage
pub fn encrypt(plain_text: &str) -> Result<String> {
    let cipher = Aes256Gcm::new(MASTER_KEY.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plain_text.as_bytes())
        .map_err(|e| Error::Invalid {
            message: format!("Encryption failed: {e}"),
        })?;

    let mut combined = nonce.to_vec();
    combined.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(combined))
}

/// Decrypt a stored token
pub fn decrypt(cipher_text: &str) -> Result<String> {
    let data = BASE64.decode(cipher_text).map_err(|e| Error::Invalid {
        message: format!("Base64 decode failed: {e}"),
    })?;

    if data.len() < 12 {
        return Err(Error::Invalid {
            message: "Ciphertext too short".to_string(),
        });
    }

    let cipher = Aes256Gcm::new(MASTER_KEY.into());
    let nonce = Nonce::<Aes256Gcm>::from_slice(&data[0..12]);
    let ciphertext = &data[12..];

    let plaintext_bytes = cipher.decrypt(nonce, ciphertext).map_err(|e| Error::Invalid {
        message: format!("Decryption failed: {e}"),
    })?;

    String::from_utf8(plaintext_bytes).map_err(|e| Error::Invalid {
        message: format!("UTF-8 decode failed: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let original = "bearer-token-abc123";
        let encrypted = encrypt(original).expect("Encryption failed");
        let decrypted = decrypt(&encrypted).expect("Decryption failed");
        assert_eq!(original, decrypted);
    }

    #[test]
    fn test_encrypt_produces_different_ciphertext() {
        let original = "token";
        let encrypted1 = encrypt(original).expect("Encryption failed");
        let encrypted2 = encrypt(original).expect("Encryption failed");
        // Random nonce per encryption.
        assert_ne!(encrypted1, encrypted2);
    }

    #[test]
    fn test_decrypt_rejects_invalid_input() {
        assert!(decrypt("not_valid_base64!!!").is_err());
        assert!(decrypt("AQIDBA==").is_err());
    }
}
