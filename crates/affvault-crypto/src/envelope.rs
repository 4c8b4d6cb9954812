//! Password-protected credential envelopes.
//!
//! Wire format (JSON, every field standard base64):
//! `{ "encrypted": ciphertext+tag, "iv": 12 bytes, "salt": 16 bytes }`
//!
//! Key: PBKDF2-HMAC-SHA256(password, salt, 100k) -> AES-256-GCM, no AAD.
//! Envelopes written by the browser app's WebCrypto code decrypt here and
//! vice versa.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroizing;

use crate::aes_gcm::{aes_gcm_open, aes_gcm_seal};
use crate::base64::{base64_decode, base64_encode};
use crate::error::CryptoError;
use crate::kdf::derive_key;
use crate::random::{random_array, OsRandom, RandomSource};
use crate::types::{AES_GCM_IV_LENGTH, SALT_LENGTH};

/// Output of one encryption call. Opaque to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    pub encrypted: String,
    pub iv: String,
    pub salt: String,
}

impl EncryptedEnvelope {
    /// Validate the shape of an untrusted JSON value.
    ///
    /// Missing or non-string fields are rejected with
    /// [`CryptoError::InvalidInput`] before any key derivation happens.
    pub fn from_json_value(value: &Value) -> Result<Self, CryptoError> {
        let obj = value
            .as_object()
            .ok_or_else(|| CryptoError::InvalidInput("envelope must be a JSON object".into()))?;
        let field = |name: &str| {
            obj.get(name)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| {
                    CryptoError::InvalidInput(format!(
                        "envelope field \"{name}\" is missing or not a string"
                    ))
                })
        };
        Ok(Self {
            encrypted: field("encrypted")?,
            iv: field("iv")?,
            salt: field("salt")?,
        })
    }

    /// Parse and validate an envelope from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, CryptoError> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
        Self::from_json_value(&value)
    }
}

/// Encrypts and decrypts credential payloads.
///
/// Holds only the random source; every call derives its own key and draws a
/// fresh salt and IV, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct CredentialCipher<R = OsRandom> {
    rng: R,
}

impl CredentialCipher<OsRandom> {
    pub fn new() -> Self {
        Self { rng: OsRandom }
    }
}

impl<R: RandomSource> CredentialCipher<R> {
    /// Use a specific random source for salts and IVs.
    pub fn with_random(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Serialize `payload` to JSON and seal it under a key derived from `password`.
    ///
    /// No strength policy is applied here; callers gate weak passwords first.
    pub fn encrypt<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        password: &str,
    ) -> Result<EncryptedEnvelope, CryptoError> {
        if password.is_empty() {
            return Err(CryptoError::InvalidInput("password must not be empty".into()));
        }
        let plaintext = Zeroizing::new(serde_json::to_vec(payload).map_err(|e| {
            CryptoError::InvalidInput(format!("payload is not JSON-serializable: {e}"))
        })?);

        // Salt first, then IV.
        let salt: [u8; SALT_LENGTH] = random_array(&self.rng)?;
        let iv: [u8; AES_GCM_IV_LENGTH] = random_array(&self.rng)?;

        let key = derive_key(password, &salt);
        let ciphertext = aes_gcm_seal(key.as_slice(), &iv, &plaintext, &[])?;

        Ok(EncryptedEnvelope {
            encrypted: base64_encode(&ciphertext),
            iv: base64_encode(&iv),
            salt: base64_encode(&salt),
        })
    }

    /// Inverse of [`CredentialCipher::encrypt`].
    pub fn decrypt<T: DeserializeOwned>(
        &self,
        envelope: &EncryptedEnvelope,
        password: &str,
    ) -> Result<T, CryptoError> {
        decrypt_credentials(envelope, password)
    }
}

/// Encrypt `payload` with OS randomness.
pub fn encrypt_credentials<T: Serialize + ?Sized>(
    payload: &T,
    password: &str,
) -> Result<EncryptedEnvelope, CryptoError> {
    CredentialCipher::new().encrypt(payload, password)
}

/// Decrypt an envelope and parse the recovered JSON as `T`.
///
/// Fails with [`CryptoError::DecryptionFailed`] for a wrong password, any
/// tampering, fields that are not valid base64, or plaintext that does not
/// parse as `T`. The cases are deliberately indistinguishable.
pub fn decrypt_credentials<T: DeserializeOwned>(
    envelope: &EncryptedEnvelope,
    password: &str,
) -> Result<T, CryptoError> {
    let salt = base64_decode(&envelope.salt).map_err(|_| CryptoError::DecryptionFailed)?;
    let iv = base64_decode(&envelope.iv).map_err(|_| CryptoError::DecryptionFailed)?;
    let ciphertext =
        base64_decode(&envelope.encrypted).map_err(|_| CryptoError::DecryptionFailed)?;
    if iv.len() != AES_GCM_IV_LENGTH {
        return Err(CryptoError::DecryptionFailed);
    }

    let key = derive_key(password, &salt);
    let plaintext = Zeroizing::new(aes_gcm_open(key.as_slice(), &iv, &ciphertext, &[])?);

    serde_json::from_slice(&plaintext).map_err(|_| CryptoError::DecryptionFailed)
}
