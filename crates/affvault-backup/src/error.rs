use affvault_crypto::{CryptoError, StrengthLabel};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("You don't have any credentials to export")]
    NothingToExport,

    #[error("Password is too weak: {label} (score {score}, need at least {required})")]
    WeakPassword {
        label: StrengthLabel,
        score: u8,
        required: u8,
    },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password is required to import credentials")]
    PasswordRequired,

    #[error("Invalid backup file format: {0}")]
    InvalidBackupFile(String),

    #[error("Unsupported backup version: {0}")]
    UnsupportedVersion(String),

    #[error("Invalid backup policy: {0}")]
    InvalidPolicy(String),

    #[error("Credential store error: {0}")]
    Store(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
