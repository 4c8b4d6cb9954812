//! WASM bindings for affvault.
//!
//! Exposes password scoring, credential envelopes and the backup workflow
//! via wasm-bindgen for the TypeScript credentials screen.

pub mod backup;
pub mod crypto;
mod error;
