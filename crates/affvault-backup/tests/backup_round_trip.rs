//! End-to-end backup flow: export, write to disk, read back, confirm import.

use std::collections::BTreeMap;

use affvault_backup::{
    create_export, prepare_import, read_export_file, write_export_file, BackupError,
    BackupPolicy, CredentialRecord, CredentialStore,
};
use serde_json::{json, Map, Value};

const PASSWORD: &str = "Abcdefghijklmnop1!";

#[derive(Default)]
struct Table {
    rows: BTreeMap<String, CredentialRecord>,
}

impl CredentialStore for Table {
    type Error = std::convert::Infallible;

    fn existing_platforms(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.rows.keys().cloned().collect())
    }

    fn upsert(&mut self, record: &CredentialRecord) -> Result<(), Self::Error> {
        self.rows.insert(record.platform.clone(), record.clone());
        Ok(())
    }
}

fn creds(v: Value) -> Map<String, Value> {
    v.as_object().cloned().unwrap_or_default()
}

fn database_rows() -> Vec<CredentialRecord> {
    let rows = json!([
        {
            "id": "1",
            "user_id": "u-1",
            "platform": "amazon",
            "credentials": { "accessKey": "AKIA", "secretKey": "shh", "partnerTag": "tag-20" },
            "is_active": true
        },
        {
            "id": "2",
            "user_id": "u-1",
            "platform": "shareasale",
            "credentials": { "apiToken": "t", "apiSecret": "s", "affiliateId": "42" },
            "is_active": false
        }
    ]);
    serde_json::from_value(rows).unwrap()
}

#[test]
fn export_and_restore_into_another_account() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_export(&database_rows(), PASSWORD, PASSWORD, &BackupPolicy::default())
        .unwrap();
    let path = write_export_file(dir.path(), &file).unwrap();

    // The second account already has Amazon credentials.
    let mut target = Table::default();
    target
        .upsert(&CredentialRecord::new("amazon", creds(json!({"accessKey": "OLD"}))))
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let pending = prepare_import(&text, PASSWORD, &target).unwrap();
    assert_eq!(pending.plan().to_overwrite, vec!["amazon"]);
    assert_eq!(pending.plan().to_add, vec!["shareasale"]);

    let summary = pending.confirm(&mut target);
    assert_eq!(summary.imported, 2);
    assert!(summary.failed.is_empty());

    let amazon = &target.rows["amazon"];
    assert_eq!(amazon.credentials["accessKey"], "AKIA");
    assert!(amazon.extra.get("user_id").is_none());
    assert_eq!(target.rows["shareasale"].is_active, Some(false));
}

#[test]
fn restored_file_round_trips_through_reader() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_export(&database_rows(), PASSWORD, PASSWORD, &BackupPolicy::default())
        .unwrap();
    let path = write_export_file(dir.path(), &file).unwrap();
    assert_eq!(read_export_file(&path).unwrap(), file);
}

#[test]
fn tampered_file_fails_without_touching_store() {
    let file = create_export(&database_rows(), PASSWORD, PASSWORD, &BackupPolicy::default())
        .unwrap();
    let mut value = serde_json::to_value(&file).unwrap();
    let encrypted = value["data"]["encrypted"].as_str().unwrap().to_string();
    // Swap the first base64 character for a different valid one.
    let first = if encrypted.starts_with('A') { "B" } else { "A" };
    value["data"]["encrypted"] = json!(format!("{first}{}", &encrypted[1..]));

    let target = Table::default();
    let err = prepare_import(&value.to_string(), PASSWORD, &target).unwrap_err();
    assert_eq!(err.to_string(), "Invalid password or corrupted data");
    assert!(target.rows.is_empty());
}

#[test]
fn browser_backup_restores() {
    // Written by the web app: WebCrypto PBKDF2/SHA-256/100000, AES-GCM-256.
    let text = r#"{
  "version": "1.0",
  "exportDate": "2026-10-14T08:15:30.250Z",
  "data": {
    "encrypted": "5D46eJA4C4Lw3fxCgCn3eDuR98aHsntow/rkkLf2tbrMlPB/q6RybuRBKmlEnFIBiE1XXm/puf7wZXKrQ0gMPTh7TVz0JLTgmny6lYJyPJ/Mv+rmm/bRE2ShAWRCgjbtsTS3dsOc+vo/rjVmNtOck6UT/v1SQpBscA==",
    "iv": "oKGio6Slpqeoqaqr",
    "salt": "AAECAwQFBgcICQoLDA0ODw=="
  }
}"#;
    let mut target = Table::default();
    let pending = prepare_import(text, "Correct-Horse-Battery-42!", &target).unwrap();
    assert_eq!(pending.plan().to_add, vec!["amazon"]);
    pending.confirm(&mut target);
    assert_eq!(target.rows["amazon"].credentials["partnerTag"], "shop-20");
}

#[test]
fn weak_password_never_produces_a_file() {
    let err = create_export(&database_rows(), "Abcdefgh1", "Abcdefgh1", &BackupPolicy::default())
        .unwrap_err();
    assert!(matches!(err, BackupError::WeakPassword { score: 2, .. }));
}
