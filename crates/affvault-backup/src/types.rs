use std::str::FromStr;

use affvault_crypto::EncryptedEnvelope;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::BackupError;

/// Export wrapper version written by this crate.
pub const EXPORT_VERSION: &str = "1.0";

/// Export wrapper versions accepted on import.
pub const SUPPORTED_EXPORT_VERSIONS: &[&str] = &[EXPORT_VERSION];

/// Affiliate networks the app knows credentials for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffiliatePlatform {
    Amazon,
    Admitad,
    Clickbank,
    Shareasale,
    Cj,
    Impact,
    Rakuten,
    Appsumo,
    Gumroad,
    Udemy,
    Envato,
}

impl AffiliatePlatform {
    pub const ALL: [AffiliatePlatform; 11] = [
        AffiliatePlatform::Amazon,
        AffiliatePlatform::Admitad,
        AffiliatePlatform::Clickbank,
        AffiliatePlatform::Shareasale,
        AffiliatePlatform::Cj,
        AffiliatePlatform::Impact,
        AffiliatePlatform::Rakuten,
        AffiliatePlatform::Appsumo,
        AffiliatePlatform::Gumroad,
        AffiliatePlatform::Udemy,
        AffiliatePlatform::Envato,
    ];

    /// Identifier stored in credential records.
    pub fn id(&self) -> &'static str {
        match self {
            AffiliatePlatform::Amazon => "amazon",
            AffiliatePlatform::Admitad => "admitad",
            AffiliatePlatform::Clickbank => "clickbank",
            AffiliatePlatform::Shareasale => "shareasale",
            AffiliatePlatform::Cj => "cj",
            AffiliatePlatform::Impact => "impact",
            AffiliatePlatform::Rakuten => "rakuten",
            AffiliatePlatform::Appsumo => "appsumo",
            AffiliatePlatform::Gumroad => "gumroad",
            AffiliatePlatform::Udemy => "udemy",
            AffiliatePlatform::Envato => "envato",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AffiliatePlatform::Amazon => "Amazon Associates",
            AffiliatePlatform::Admitad => "Admitad",
            AffiliatePlatform::Clickbank => "ClickBank",
            AffiliatePlatform::Shareasale => "ShareASale",
            AffiliatePlatform::Cj => "CJ Affiliate",
            AffiliatePlatform::Impact => "Impact",
            AffiliatePlatform::Rakuten => "Rakuten Advertising",
            other => other.id(),
        }
    }
}

impl FromStr for AffiliatePlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AffiliatePlatform::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| format!("unknown affiliate platform: {s}"))
    }
}

/// Human name for a platform id; unknown ids are returned as-is.
pub fn display_name(platform: &str) -> &str {
    match platform.parse::<AffiliatePlatform>() {
        Ok(p) => p.display_name(),
        Err(_) => platform,
    }
}

/// One platform's credentials, as stored and as carried inside a backup.
///
/// Exports are taken from full database rows, so any extra columns (`id`,
/// `user_id`, timestamps) ride along in `extra`. Import only applies
/// `platform`, `credentials` and `is_active`.
///
/// The row columns are nullable: `credentials` is arbitrary JSON and
/// `is_active` may be `null` or absent. Both are forwarded to the store
/// unchanged; `None` for `is_active` leaves the choice to the store's
/// column default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub platform: String,
    #[serde(default)]
    pub credentials: Value,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CredentialRecord {
    pub fn new(platform: impl Into<String>, credentials: Map<String, Value>) -> Self {
        Self {
            platform: platform.into(),
            credentials: Value::Object(credentials),
            is_active: Some(true),
            extra: Map::new(),
        }
    }

    /// `is_active` with a missing value read as active.
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    /// Copy with only the fields an import writes.
    pub fn importable(&self) -> Self {
        Self {
            platform: self.platform.clone(),
            credentials: self.credentials.clone(),
            is_active: self.is_active,
            extra: Map::new(),
        }
    }
}

/// The downloadable backup: `{ version, exportDate, data }`.
///
/// `version` and `exportDate` are not covered by the envelope's
/// authentication tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub version: String,
    #[serde(
        serialize_with = "serialize_export_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub export_date: Option<DateTime<Utc>>,
    pub data: EncryptedEnvelope,
}

fn serialize_export_date<S: Serializer>(
    date: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        // Same shape as JS `Date.toISOString()`
        Some(d) => serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}

impl ExportFile {
    pub fn new(data: EncryptedEnvelope, export_date: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            export_date: Some(export_date),
            data,
        }
    }

    /// Parse an untrusted backup file.
    ///
    /// Checks the wrapper only; nothing is decrypted here.
    pub fn parse(text: &str) -> Result<Self, BackupError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| BackupError::InvalidBackupFile(format!("not valid JSON: {e}")))?;

        let version = value
            .get("version")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| BackupError::InvalidBackupFile("missing version".into()))?;
        let data = value
            .get("data")
            .filter(|d| !d.is_null())
            .ok_or_else(|| BackupError::InvalidBackupFile("missing data".into()))?;

        if !SUPPORTED_EXPORT_VERSIONS.contains(&version) {
            return Err(BackupError::UnsupportedVersion(version.to_string()));
        }

        let data = EncryptedEnvelope::from_json_value(data)
            .map_err(|e| BackupError::InvalidBackupFile(e.to_string()))?;

        // Missing or null is tolerated; anything else must be an RFC 3339 string.
        let export_date = match value.get("exportDate") {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(
                DateTime::parse_from_rfc3339(raw)
                    .map_err(|e| BackupError::InvalidBackupFile(format!("bad exportDate: {e}")))?
                    .with_timezone(&Utc),
            ),
            Some(other) => {
                return Err(BackupError::InvalidBackupFile(format!(
                    "exportDate must be a string, got {other}"
                )))
            }
        };

        Ok(Self {
            version: version.to_string(),
            export_date,
            data,
        })
    }

    /// Pretty-printed JSON, two-space indent, as written to disk.
    pub fn to_pretty_json(&self) -> Result<String, BackupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn envelope() -> EncryptedEnvelope {
        EncryptedEnvelope {
            encrypted: "Y2lwaGVy".into(),
            iv: "aXY=".into(),
            salt: "c2FsdA==".into(),
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("amazon"), "Amazon Associates");
        assert_eq!(display_name("cj"), "CJ Affiliate");
        assert_eq!(display_name("rakuten"), "Rakuten Advertising");
        assert_eq!(display_name("gumroad"), "gumroad");
        assert_eq!(display_name("mystery-network"), "mystery-network");
    }

    #[test]
    fn platform_ids_round_trip_through_serde() {
        for p in AffiliatePlatform::ALL {
            let json = serde_json::to_value(p).unwrap();
            assert_eq!(json, p.id());
            assert_eq!(p.id().parse::<AffiliatePlatform>().unwrap(), p);
        }
    }

    #[test]
    fn record_keeps_extra_columns() {
        let row = json!({
            "id": "6f1c",
            "user_id": "u-1",
            "platform": "impact",
            "credentials": { "accountSid": "IR123", "authToken": "tok" },
            "is_active": false,
            "created_at": "2026-01-01T00:00:00Z"
        });
        let record: CredentialRecord = serde_json::from_value(row.clone()).unwrap();
        assert_eq!(record.platform, "impact");
        assert_eq!(record.is_active, Some(false));
        assert_eq!(record.extra["user_id"], "u-1");
        assert_eq!(serde_json::to_value(&record).unwrap(), row);

        let importable = record.importable();
        assert!(importable.extra.is_empty());
        assert_eq!(importable.credentials["accountSid"], "IR123");
    }

    #[test]
    fn record_defaults() {
        let record: CredentialRecord = serde_json::from_value(json!({"platform": "cj"})).unwrap();
        assert_eq!(record.is_active, None);
        assert!(record.active());
        assert!(record.credentials.is_null());
    }

    #[test]
    fn record_accepts_null_columns() {
        let row = json!({
            "id": "7a2e",
            "platform": "amazon",
            "credentials": null,
            "is_active": null
        });
        let record: CredentialRecord = serde_json::from_value(row.clone()).unwrap();
        assert_eq!(record.is_active, None);
        assert!(record.credentials.is_null());
        assert_eq!(serde_json::to_value(&record).unwrap(), row);
    }

    #[test]
    fn record_accepts_non_object_credentials() {
        let record: CredentialRecord =
            serde_json::from_value(json!({"platform": "cj", "credentials": "legacy-token"}))
                .unwrap();
        assert_eq!(record.credentials, "legacy-token");
    }

    #[test]
    fn export_file_json_shape() {
        let date = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();
        let file = ExportFile::new(envelope(), date);
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["exportDate"], "2026-10-14T09:30:00.000Z");
        assert_eq!(value["data"]["iv"], "aXY=");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn parse_accepts_what_we_write() {
        let date = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();
        let file = ExportFile::new(envelope(), date);
        let parsed = ExportFile::parse(&file.to_pretty_json().unwrap()).unwrap();
        assert_eq!(parsed, file);
    }

    #[test]
    fn parse_tolerates_missing_or_null_export_date() {
        let text = r#"{"version":"1.0","data":{"encrypted":"a","iv":"b","salt":"c"}}"#;
        let parsed = ExportFile::parse(text).unwrap();
        assert!(parsed.export_date.is_none());

        let text = r#"{"version":"1.0","exportDate":null,"data":{"encrypted":"a","iv":"b","salt":"c"}}"#;
        assert!(ExportFile::parse(text).unwrap().export_date.is_none());
    }

    #[test]
    fn parse_rejects_bad_wrappers() {
        let cases = [
            "not json",
            r#"{"data":{"encrypted":"a","iv":"b","salt":"c"}}"#,
            r#"{"version":"","data":{"encrypted":"a","iv":"b","salt":"c"}}"#,
            r#"{"version":"1.0"}"#,
            r#"{"version":"1.0","data":null}"#,
            r#"{"version":"1.0","data":{"encrypted":"a","iv":"b"}}"#,
            r#"{"version":"1.0","exportDate":"yesterday","data":{"encrypted":"a","iv":"b","salt":"c"}}"#,
            r#"{"version":"1.0","exportDate":12345,"data":{"encrypted":"a","iv":"b","salt":"c"}}"#,
            r#"{"version":"1.0","exportDate":true,"data":{"encrypted":"a","iv":"b","salt":"c"}}"#,
            r#"{"version":"1.0","exportDate":{},"data":{"encrypted":"a","iv":"b","salt":"c"}}"#,
        ];
        for text in cases {
            assert!(
                matches!(ExportFile::parse(text), Err(BackupError::InvalidBackupFile(_))),
                "accepted {text}"
            );
        }
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let text = r#"{"version":"2.0","data":{"encrypted":"a","iv":"b","salt":"c"}}"#;
        match ExportFile::parse(text) {
            Err(BackupError::UnsupportedVersion(v)) => assert_eq!(v, "2.0"),
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
    }
}
