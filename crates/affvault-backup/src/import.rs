//! Import side: decrypt a backup, show what it will change, then upsert.
//!
//! The confirmation step belongs to the caller. [`prepare_import`] returns a
//! [`PendingImport`] that does nothing until [`PendingImport::confirm`] is
//! called; dropping it cancels the import.

use std::collections::HashSet;

use affvault_crypto::decrypt_credentials;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::BackupError;
use crate::types::{display_name, CredentialRecord, ExportFile, SUPPORTED_EXPORT_VERSIONS};

/// Persistence seam for credential records, keyed by platform.
pub trait CredentialStore {
    type Error: std::fmt::Display;

    /// Platforms that already have credentials.
    fn existing_platforms(&self) -> Result<Vec<String>, Self::Error>;

    /// Insert or replace the record for `record.platform`.
    fn upsert(&mut self, record: &CredentialRecord) -> Result<(), Self::Error>;
}

/// Decrypt the records inside a backup.
///
/// A wrong password surfaces as the generic crypto failure ("Invalid
/// password or corrupted data").
pub fn decrypt_export(
    file: &ExportFile,
    password: &str,
) -> Result<Vec<CredentialRecord>, BackupError> {
    if !SUPPORTED_EXPORT_VERSIONS.contains(&file.version.as_str()) {
        return Err(BackupError::UnsupportedVersion(file.version.clone()));
    }
    if password.is_empty() {
        return Err(BackupError::PasswordRequired);
    }
    let payload: Value = decrypt_credentials(&file.data, password)?;
    serde_json::from_value(payload).map_err(|e| {
        BackupError::InvalidBackupFile(format!("backup does not contain credential records: {e}"))
    })
}

/// Which incoming platforms replace existing credentials and which are new.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPlan {
    pub to_overwrite: Vec<String>,
    pub to_add: Vec<String>,
}

impl ImportPlan {
    /// Partition incoming platforms, keeping first-seen order.
    ///
    /// A platform listed twice in the backup is counted once.
    pub fn new(incoming: &[CredentialRecord], existing: &[String]) -> Self {
        let mut seen = HashSet::new();
        let mut plan = Self::default();
        for record in incoming {
            let platform = record.platform.as_str();
            if !seen.insert(platform) {
                continue;
            }
            if existing.iter().any(|p| p == platform) {
                plan.to_overwrite.push(platform.to_string());
            } else {
                plan.to_add.push(platform.to_string());
            }
        }
        plan
    }

    pub fn total(&self) -> usize {
        self.to_overwrite.len() + self.to_add.len()
    }

    pub fn summary(&self) -> String {
        let total = self.total();
        let mut lines = vec![format!(
            "You are about to import credentials for {} platform{}.",
            total,
            if total == 1 { "" } else { "s" }
        )];
        if !self.to_overwrite.is_empty() {
            lines.push(format!(
                "Will be overwritten: {}",
                Self::names(&self.to_overwrite)
            ));
        }
        if !self.to_add.is_empty() {
            lines.push(format!("New platforms to be added: {}", Self::names(&self.to_add)));
        }
        lines.join("\n")
    }

    fn names(platforms: &[String]) -> String {
        platforms
            .iter()
            .map(|p| display_name(p))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    pub platform: String,
    pub message: String,
}

/// Outcome of applying an import. Individual failures do not stop the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: Vec<ImportFailure>,
}

impl ImportSummary {
    pub fn message(&self) -> String {
        let mut msg = format!("Successfully imported {} credential(s).", self.imported);
        if !self.failed.is_empty() {
            msg.push_str(&format!(" Failed: {}", self.failed.len()));
        }
        msg
    }
}

/// Upsert each record. Only `platform`, `credentials` and `is_active` are written.
pub fn apply_import<S: CredentialStore>(store: &mut S, records: &[CredentialRecord]) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for record in records {
        match store.upsert(&record.importable()) {
            Ok(()) => summary.imported += 1,
            Err(e) => {
                warn!(platform = %record.platform, error = %e, "failed to import credentials");
                summary.failed.push(ImportFailure {
                    platform: record.platform.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
    info!(
        imported = summary.imported,
        failed = summary.failed.len(),
        "credentials import applied"
    );
    summary
}

/// A decrypted backup waiting for the user's go-ahead.
#[derive(Debug)]
pub struct PendingImport {
    records: Vec<CredentialRecord>,
    plan: ImportPlan,
}

impl PendingImport {
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn plan(&self) -> &ImportPlan {
        &self.plan
    }

    pub fn confirm<S: CredentialStore>(self, store: &mut S) -> ImportSummary {
        apply_import(store, &self.records)
    }
}

/// Parse, decrypt and plan an import from backup file text.
pub fn prepare_import<S: CredentialStore>(
    text: &str,
    password: &str,
    store: &S,
) -> Result<PendingImport, BackupError> {
    let file = ExportFile::parse(text)?;
    let records = decrypt_export(&file, password)?;
    let existing = store
        .existing_platforms()
        .map_err(|e| BackupError::Store(e.to_string()))?;
    let plan = ImportPlan::new(&records, &existing);
    debug!(
        overwrite = plan.to_overwrite.len(),
        add = plan.to_add.len(),
        "import planned"
    );
    Ok(PendingImport { records, plan })
}
