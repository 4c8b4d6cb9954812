use serde::{Deserialize, Serialize};

use crate::error::BackupError;

/// Lowest score the export gate may be configured to accept ("Good").
pub const MIN_EXPORT_SCORE: u8 = 3;

/// Highest score the evaluator produces ("Strong").
const MAX_SCORE: u8 = 4;

/// Export policy, loadable from JSON application config.
///
/// ```json
/// { "minScore": 4 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackupPolicy {
    /// Minimum password strength score required to export.
    pub min_score: u8,
}

impl Default for BackupPolicy {
    fn default() -> Self {
        Self {
            min_score: MIN_EXPORT_SCORE,
        }
    }
}

impl BackupPolicy {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, BackupError> {
        let policy: Self = serde_json::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    /// The gate can be tightened to Strong but never loosened below Good.
    pub fn validate(&self) -> Result<(), BackupError> {
        if !(MIN_EXPORT_SCORE..=MAX_SCORE).contains(&self.min_score) {
            return Err(BackupError::InvalidPolicy(format!(
                "minScore must be between {} and {}, got {}",
                MIN_EXPORT_SCORE, MAX_SCORE, self.min_score
            )));
        }
        Ok(())
    }
}
