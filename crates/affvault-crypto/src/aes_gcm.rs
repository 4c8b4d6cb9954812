//! AES-256-GCM sealing with a caller-supplied IV.
//!
//! Output layout matches WebCrypto: `[ciphertext][tag:16]`. The IV travels
//! separately in the envelope.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::CryptoError;
use crate::types::{AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH};

/// Encrypt `plaintext` under `key` and `iv`, returning ciphertext with the tag appended.
pub fn aes_gcm_seal(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: key.len(),
        });
    }
    if iv.len() != AES_GCM_IV_LENGTH {
        return Err(CryptoError::InvalidInput(format!(
            "IV must be {} bytes, got {}",
            AES_GCM_IV_LENGTH,
            iv.len()
        )));
    }
    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    cipher
        .encrypt(
            Nonce::from_slice(iv),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

/// Decrypt and authenticate `ciphertext` (tag appended).
///
/// Every failure, including a malformed IV or truncated input, is reported
/// as [`CryptoError::DecryptionFailed`].
pub fn aes_gcm_open(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if key.len() != AES_KEY_LENGTH
        || iv.len() != AES_GCM_IV_LENGTH
        || ciphertext.len() < AES_GCM_TAG_LENGTH
    {
        return Err(CryptoError::DecryptionFailed);
    }
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::DecryptionFailed)?;
    cipher
        .decrypt(
            Nonce::from_slice(iv),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| CryptoError::DecryptionFailed)
}
