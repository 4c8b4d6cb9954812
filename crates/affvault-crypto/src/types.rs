/// PBKDF2-HMAC-SHA256 iteration count.
///
/// Part of the file format: encrypt and decrypt must agree, and it is not
/// stored in the envelope. Changing it requires a new export version.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// PBKDF2 salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// AES-GCM IV length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_IV_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;
