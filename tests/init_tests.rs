//! `init` reads the process environment, so these tests run serially.

use cos_backup_store::{ConfigError, CosObjectStore, ObjectStore, StorageError};
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::io::Write;

const CREDENTIALS_FILE: &str = "TENCENT_CREDENTIALS_FILE";
const SECRET_ID: &str = "TENCENT_CLOUD_SECRETID";
const SECRET_KEY: &str = "TENCENT_CLOUD_SECRETKEY";

fn config(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn clear_env() {
    for name in [CREDENTIALS_FILE, SECRET_ID, SECRET_KEY] {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn region_alone_is_enough() {
    clear_env();
    let mut store = CosObjectStore::new();

    store.init(&config(&[("region", "ap-guangzhou")])).unwrap();

    let config = store.config().unwrap();
    assert_eq!(config.region(), "ap-guangzhou");
    assert!(config.insecure_skip_tls_verify());
}

#[test]
#[serial]
fn tls_flag_is_parsed() {
    clear_env();
    let mut store = CosObjectStore::new();

    store
        .init(&config(&[("region", "ap-beijing"), ("insecureSkipTLSVerify", "F")]))
        .unwrap();
    assert!(!store.config().unwrap().insecure_skip_tls_verify());

    store
        .init(&config(&[("region", "ap-beijing"), ("insecureSkipTLSVerify", "")]))
        .unwrap();
    assert!(store.config().unwrap().insecure_skip_tls_verify());
}

#[test]
#[serial]
fn empty_config_is_missing_region() {
    clear_env();
    let err = CosObjectStore::new().init(&HashMap::new()).unwrap_err();
    assert!(matches!(err, StorageError::Config(ConfigError::MissingRegion)));
    assert_eq!(err.to_string(), "region is empty");
}

#[test]
#[serial]
fn unknown_keys_are_rejected() {
    clear_env();
    let err = CosObjectStore::new()
        .init(&config(&[("region", "ap-guangzhou"), ("s3Url", "x"), ("bucket", "y")]))
        .unwrap_err();
    match err {
        StorageError::Config(ConfigError::UnknownKeys { keys }) => {
            assert_eq!(keys, vec!["bucket", "s3Url"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
#[serial]
fn bad_boolean_is_rejected() {
    clear_env();
    let err = CosObjectStore::new()
        .init(&config(&[("region", "ap-guangzhou"), ("insecureSkipTLSVerify", "yes")]))
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Config(ConfigError::InvalidBoolean { .. })
    ));
}

#[test]
#[serial]
fn override_file_replaces_process_credentials() {
    clear_env();
    env::set_var(SECRET_ID, "AKIDprocess");
    env::set_var(SECRET_KEY, "process-secret");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{SECRET_ID}=AKIDfromfile").unwrap();
    writeln!(file, "{SECRET_KEY}=file-secret").unwrap();
    env::set_var(CREDENTIALS_FILE, file.path());

    CosObjectStore::new()
        .init(&config(&[("region", "ap-guangzhou")]))
        .unwrap();

    assert_eq!(env::var(SECRET_ID).unwrap(), "AKIDfromfile");
    assert_eq!(env::var(SECRET_KEY).unwrap(), "file-secret");
    clear_env();
}

#[test]
#[serial]
fn unreadable_override_file_fails_init() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("credentials");
    env::set_var(CREDENTIALS_FILE, &missing);

    let err = CosObjectStore::new()
        .init(&config(&[("region", "ap-guangzhou")]))
        .unwrap_err();
    match err {
        StorageError::Credentials(load) => {
            assert_eq!(load.env, CREDENTIALS_FILE);
            assert_eq!(load.path, missing);
        }
        other => panic!("unexpected error: {other}"),
    }
    clear_env();
}

#[tokio::test]
#[serial]
async fn signed_url_uses_current_credentials() {
    clear_env();
    env::set_var(SECRET_ID, "AKIDfirst");
    env::set_var(SECRET_KEY, "secret");
    let mut store = CosObjectStore::new();
    store.init(&config(&[("region", "ap-guangzhou")])).unwrap();

    env::set_var(SECRET_ID, "AKIDrotated");
    let url = store
        .create_signed_url(
            "backups-1250000000",
            "backups/b1.tar.gz",
            std::time::Duration::from_secs(60),
        )
        .await
        .unwrap();

    assert!(url.starts_with(
        "https://backups-1250000000.cos.ap-guangzhou.myqcloud.com/backups/b1.tar.gz?"
    ));
    assert!(url.contains("X-Amz-Credential=AKIDrotated"));
    assert!(!url.contains("AKIDfirst"));
    clear_env();
}
