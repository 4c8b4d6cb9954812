//! Secure random source used for salts and IVs.

use crate::error::CryptoError;

/// Source of cryptographically secure random bytes.
///
/// Production code uses [`OsRandom`]. Tests can supply a fixed sequence to
/// get reproducible envelopes.
pub trait RandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// The operating system CSPRNG (`crypto.getRandomValues` under wasm).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        getrandom::getrandom(dest).map_err(|e| CryptoError::RngFailed(e.to_string()))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill(dest)
    }
}

/// Draw a fixed-size array of random bytes.
pub fn random_array<const N: usize>(rng: &impl RandomSource) -> Result<[u8; N], CryptoError> {
    let mut out = [0u8; N];
    rng.fill(&mut out)?;
    Ok(out)
}
