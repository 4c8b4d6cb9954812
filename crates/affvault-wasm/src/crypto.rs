//! WASM bindings for affvault-crypto.

use crate::error::{to_js_error, to_js_value};
use affvault_crypto::{
    check_password_strength, decrypt_credentials, encrypt_credentials, EncryptedEnvelope,
    PBKDF2_ITERATIONS,
};
use serde_json::Value;
use wasm_bindgen::prelude::*;

// --- Constants ---

#[wasm_bindgen(js_name = "PBKDF2_ITERATIONS")]
pub fn pbkdf2_iterations() -> u32 {
    PBKDF2_ITERATIONS
}

// --- Strength ---

/// Returns `{ score, label, color, percentage, requirements }`.
#[wasm_bindgen(js_name = "checkPasswordStrength")]
pub fn wasm_check_password_strength(password: &str) -> Result<JsValue, JsValue> {
    to_js_value(&check_password_strength(password))
}

// --- Envelopes ---

#[wasm_bindgen(js_name = "encryptCredentials")]
pub fn wasm_encrypt_credentials(data: JsValue, password: &str) -> Result<JsValue, JsValue> {
    let payload: Value = serde_wasm_bindgen::from_value(data).map_err(to_js_error)?;
    let envelope = encrypt_credentials(&payload, password).map_err(to_js_error)?;
    to_js_value(&envelope)
}

#[wasm_bindgen(js_name = "decryptCredentials")]
pub fn wasm_decrypt_credentials(
    encrypted_data: JsValue,
    password: &str,
) -> Result<JsValue, JsValue> {
    let raw: Value = serde_wasm_bindgen::from_value(encrypted_data).map_err(to_js_error)?;
    let envelope = EncryptedEnvelope::from_json_value(&raw).map_err(to_js_error)?;
    let payload: Value = decrypt_credentials(&envelope, password).map_err(to_js_error)?;
    to_js_value(&payload)
}
