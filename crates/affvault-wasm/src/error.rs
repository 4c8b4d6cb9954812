//! Error and value conversion for the wasm-bindgen surface.

use serde::Serialize;
use wasm_bindgen::JsValue;

/// Backup and crypto errors reach TypeScript as plain message strings, so
/// the UI can show e.g. "Invalid password or corrupted data" directly.
pub fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Strength results, envelopes and import plans cross as plain objects
/// (`strength.requirements.minLength`), not JS `Map`s.
pub fn to_js_value(value: &impl Serialize) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true))
        .map_err(to_js_error)
}
