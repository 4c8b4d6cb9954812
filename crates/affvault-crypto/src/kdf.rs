//! PBKDF2-HMAC-SHA256 password key derivation.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::types::{AES_KEY_LENGTH, PBKDF2_ITERATIONS};

/// Derive a 256-bit AES key from a password and salt.
///
/// Uses [`PBKDF2_ITERATIONS`] rounds. The key is wiped when the returned
/// buffer is dropped.
pub fn derive_key(password: &str, salt: &[u8]) -> Zeroizing<[u8; AES_KEY_LENGTH]> {
    let mut key = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt,
        PBKDF2_ITERATIONS,
        key.as_mut_slice(),
    );
    key
}
