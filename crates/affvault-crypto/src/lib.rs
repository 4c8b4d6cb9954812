//! Credential backup crypto: password strength scoring and password-derived
//! AES-256-GCM envelopes.

pub mod aes_gcm;
pub mod base64;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod random;
pub mod strength;
pub mod types;

pub use aes_gcm::{aes_gcm_open, aes_gcm_seal};
pub use base64::{base64_decode, base64_encode};
pub use envelope::{decrypt_credentials, encrypt_credentials, CredentialCipher, EncryptedEnvelope};
pub use error::CryptoError;
pub use kdf::derive_key;
pub use random::{OsRandom, RandomSource};
pub use strength::{
    check_password_strength, PasswordRequirements, PasswordStrengthResult, StrengthLabel,
};
pub use types::{
    AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, PBKDF2_ITERATIONS, SALT_LENGTH,
};
