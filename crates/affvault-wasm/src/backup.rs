//! WASM bindings for affvault-backup.

use crate::error::{to_js_error, to_js_value};
use affvault_backup::{
    backup_file_name, create_export, decrypt_export, BackupPolicy, CredentialRecord, ExportFile,
    ImportPlan, EXPORT_VERSION,
};
use chrono::{NaiveDate, Utc};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = "EXPORT_VERSION")]
pub fn export_version() -> String {
    EXPORT_VERSION.to_string()
}

// --- Export ---

/// Gate the password, encrypt `records` and return the backup file text.
#[wasm_bindgen(js_name = "createExport")]
pub fn wasm_create_export(
    records: JsValue,
    password: &str,
    confirmation: &str,
    min_score: Option<u8>,
) -> Result<String, JsValue> {
    let records: Vec<CredentialRecord> =
        serde_wasm_bindgen::from_value(records).map_err(to_js_error)?;
    let policy = match min_score {
        Some(min_score) => BackupPolicy { min_score },
        None => BackupPolicy::default(),
    };
    let file = create_export(&records, password, confirmation, &policy).map_err(to_js_error)?;
    file.to_pretty_json().map_err(to_js_error)
}

/// Download name for a backup; `date` is `YYYY-MM-DD`, defaulting to today (UTC).
#[wasm_bindgen(js_name = "backupFileName")]
pub fn wasm_backup_file_name(date: Option<String>) -> Result<String, JsValue> {
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d").map_err(to_js_error)?,
        None => Utc::now().date_naive(),
    };
    Ok(backup_file_name(date))
}

// --- Import ---

#[wasm_bindgen(js_name = "parseExportFile")]
pub fn wasm_parse_export_file(text: &str) -> Result<JsValue, JsValue> {
    let file = ExportFile::parse(text).map_err(to_js_error)?;
    to_js_value(&file)
}

/// Parse and decrypt a backup file, returning its credential records.
#[wasm_bindgen(js_name = "decryptExport")]
pub fn wasm_decrypt_export(text: &str, password: &str) -> Result<JsValue, JsValue> {
    let file = ExportFile::parse(text).map_err(to_js_error)?;
    let records = decrypt_export(&file, password).map_err(to_js_error)?;
    to_js_value(&records)
}

/// Returns `{ toOverwrite, toAdd, summary }` for the confirmation dialog.
#[wasm_bindgen(js_name = "planImport")]
pub fn wasm_plan_import(records: JsValue, existing_platforms: JsValue) -> Result<JsValue, JsValue> {
    let records: Vec<CredentialRecord> =
        serde_wasm_bindgen::from_value(records).map_err(to_js_error)?;
    let existing: Vec<String> =
        serde_wasm_bindgen::from_value(existing_platforms).map_err(to_js_error)?;
    let plan = ImportPlan::new(&records, &existing);

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct PlanView<'a> {
        #[serde(flatten)]
        plan: &'a ImportPlan,
        summary: String,
    }

    to_js_value(&PlanView {
        summary: plan.summary(),
        plan: &plan,
    })
}
