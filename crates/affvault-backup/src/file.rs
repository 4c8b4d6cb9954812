//! Backup files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::BackupError;
use crate::types::ExportFile;

/// `affiliate-credentials-backup-YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("affiliate-credentials-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Write `file` into `dir` under its dated name and return the path.
///
/// An existing backup from the same day is replaced.
pub fn write_export_file(dir: &Path, file: &ExportFile) -> Result<PathBuf, BackupError> {
    let date = file.export_date.unwrap_or_else(Utc::now).date_naive();
    let path = dir.join(backup_file_name(date));
    fs::write(&path, file.to_pretty_json()?)?;
    info!(path = %path.display(), "credentials backup written");
    Ok(path)
}

/// Read and validate a backup file. Does not decrypt.
pub fn read_export_file(path: &Path) -> Result<ExportFile, BackupError> {
    let text = fs::read_to_string(path)?;
    ExportFile::parse(&text)
}
