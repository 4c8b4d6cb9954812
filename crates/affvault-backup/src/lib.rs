//! Backup workflow around the credential cipher: the export password gate,
//! the dated export file, and the confirm-then-upsert import path.

pub mod error;
pub mod export;
pub mod file;
pub mod import;
pub mod policy;
pub mod types;

pub use error::BackupError;
pub use export::{create_export, ExportGate, Exporter};
pub use file::{backup_file_name, read_export_file, write_export_file};
pub use import::{
    apply_import, decrypt_export, prepare_import, CredentialStore, ImportFailure, ImportPlan,
    ImportSummary, PendingImport,
};
pub use policy::BackupPolicy;
pub use types::{
    display_name, AffiliatePlatform, CredentialRecord, ExportFile, EXPORT_VERSION,
    SUPPORTED_EXPORT_VERSIONS,
};
