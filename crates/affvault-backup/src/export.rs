//! Export side: the password gate and creation of the dated backup.

use affvault_crypto::{
    check_password_strength, CredentialCipher, OsRandom, PasswordStrengthResult, RandomSource,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::BackupError;
use crate::policy::BackupPolicy;
use crate::types::{CredentialRecord, ExportFile};

/// Decides whether a password may be used to encrypt a backup.
#[derive(Debug, Clone, Default)]
pub struct ExportGate {
    policy: BackupPolicy,
}

impl ExportGate {
    pub fn new(policy: BackupPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &BackupPolicy {
        &self.policy
    }

    /// Strength is checked before the confirmation, so a weak password is
    /// refused even when both entries match.
    pub fn check(
        &self,
        password: &str,
        confirmation: &str,
    ) -> Result<PasswordStrengthResult, BackupError> {
        let strength = check_password_strength(password);
        if !strength.meets(self.policy.min_score) {
            return Err(BackupError::WeakPassword {
                label: strength.label,
                score: strength.score,
                required: self.policy.min_score,
            });
        }
        if confirmation.is_empty() || confirmation != password {
            return Err(BackupError::PasswordMismatch);
        }
        Ok(strength)
    }
}

/// Gate + cipher. The cipher is only reached once the gate passes.
#[derive(Debug, Clone, Default)]
pub struct Exporter<R = OsRandom> {
    gate: ExportGate,
    cipher: CredentialCipher<R>,
}

impl Exporter<OsRandom> {
    pub fn new(policy: BackupPolicy) -> Self {
        Self {
            gate: ExportGate::new(policy),
            cipher: CredentialCipher::new(),
        }
    }
}

impl<R: RandomSource> Exporter<R> {
    pub fn with_cipher(policy: BackupPolicy, cipher: CredentialCipher<R>) -> Self {
        Self {
            gate: ExportGate::new(policy),
            cipher,
        }
    }

    pub fn gate(&self) -> &ExportGate {
        &self.gate
    }

    pub fn export(
        &self,
        records: &[CredentialRecord],
        password: &str,
        confirmation: &str,
    ) -> Result<ExportFile, BackupError> {
        self.export_at(records, password, confirmation, Utc::now())
    }

    /// Like [`Exporter::export`] with an explicit timestamp.
    pub fn export_at(
        &self,
        records: &[CredentialRecord],
        password: &str,
        confirmation: &str,
        now: DateTime<Utc>,
    ) -> Result<ExportFile, BackupError> {
        if records.is_empty() {
            return Err(BackupError::NothingToExport);
        }
        let strength = self.gate.check(password, confirmation)?;
        debug!(score = strength.score, "export password accepted");

        let envelope = self.cipher.encrypt(records, password)?;
        info!(records = records.len(), "credentials backup created");
        Ok(ExportFile::new(envelope, now))
    }
}

/// One-shot export with OS randomness.
pub fn create_export(
    records: &[CredentialRecord],
    password: &str,
    confirmation: &str,
    policy: &BackupPolicy,
) -> Result<ExportFile, BackupError> {
    policy.validate()?;
    Exporter::new(policy.clone()).export(records, password, confirmation)
}
