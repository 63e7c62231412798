use cos_backup_store::{
    create_in_memory_app, Fault, InMemoryBackend, ObjectStore, Operation, StorageError,
};
use http::StatusCode;
use std::io::Cursor;
use std::time::Duration;
use tokio::io::AsyncReadExt;

const BUCKET: &str = "backups-1250000000";

fn setup() -> (std::sync::Arc<dyn ObjectStore>, InMemoryBackend) {
    let services = create_in_memory_app("ap-guangzhou").unwrap();
    (services.object_store, services.memory_backend.unwrap())
}

#[tokio::test]
async fn put_then_get_round_trip() {
    let (store, _) = setup();

    store
        .put_object(BUCKET, "backups/b1/b1.tar.gz", Box::new(Cursor::new(b"archive".to_vec())))
        .await
        .unwrap();

    let mut body = store.get_object(BUCKET, "backups/b1/b1.tar.gz").await.unwrap();
    let mut read = Vec::new();
    body.read_to_end(&mut read).await.unwrap();
    assert_eq!(read, b"archive");
}

#[tokio::test]
async fn exists_distinguishes_missing_from_failure() {
    let (store, backend) = setup();
    backend.insert(BUCKET, "present", "x").await;

    assert!(store.object_exists(BUCKET, "present").await.unwrap());
    assert!(!store.object_exists(BUCKET, "absent").await.unwrap());

    backend
        .inject_fault(Operation::Head, Fault::Status(StatusCode::FORBIDDEN))
        .await;
    assert!(!store.object_exists(BUCKET, "present").await.unwrap());

    backend
        .inject_fault(Operation::Head, Fault::Status(StatusCode::SERVICE_UNAVAILABLE))
        .await;
    let err = store.object_exists(BUCKET, "present").await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::ExistenceCheckFailed { status, .. }
            if status == StatusCode::SERVICE_UNAVAILABLE
    ));

    backend
        .inject_fault(Operation::Head, Fault::Transport("connection refused".to_string()))
        .await;
    let err = store.object_exists(BUCKET, "present").await.unwrap_err();
    assert!(matches!(err, StorageError::Transport { .. }));
}

#[tokio::test]
async fn exists_classifies_non_error_responses_by_status() {
    let (store, backend) = setup();

    backend
        .inject_fault(Operation::Head, Fault::Respond(StatusCode::NOT_FOUND))
        .await;
    assert!(!store.object_exists(BUCKET, "k").await.unwrap());

    backend
        .inject_fault(Operation::Head, Fault::Respond(StatusCode::BAD_GATEWAY))
        .await;
    assert!(store.object_exists(BUCKET, "k").await.is_err());
}

#[tokio::test]
async fn delete_requires_no_content() {
    let (store, backend) = setup();
    backend.insert(BUCKET, "old", "x").await;

    store.delete_object(BUCKET, "old").await.unwrap();
    assert!(backend.contents(BUCKET, "old").await.is_none());

    // Missing keys are still a successful delete
    store.delete_object(BUCKET, "old").await.unwrap();

    backend
        .inject_fault(Operation::Delete, Fault::Respond(StatusCode::OK))
        .await;
    let err = store.delete_object(BUCKET, "old").await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::DeleteRejected { status, .. } if status == StatusCode::OK
    ));

    // Error statuses were still answered, so they are rejections too
    backend
        .inject_fault(Operation::Delete, Fault::Status(StatusCode::FORBIDDEN))
        .await;
    let err = store.delete_object(BUCKET, "old").await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::DeleteRejected { status, .. } if status == StatusCode::FORBIDDEN
    ));

    backend
        .inject_fault(Operation::Delete, Fault::Transport("connection reset".to_string()))
        .await;
    let err = store.delete_object(BUCKET, "old").await.unwrap_err();
    match err {
        StorageError::DeleteFailed { key, source, .. } => {
            assert_eq!(key, "old");
            assert!(source.is_transport());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn put_and_get_failures_name_the_object() {
    let (store, backend) = setup();

    backend
        .inject_fault(Operation::Put, Fault::Status(StatusCode::INTERNAL_SERVER_ERROR))
        .await;
    let err = store
        .put_object(BUCKET, "k", Box::new(Cursor::new(Vec::new())))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::PutFailed { .. }));
    assert!(err.to_string().contains(BUCKET));

    let err = store.get_object(BUCKET, "missing").await.err().unwrap();
    match err {
        StorageError::GetFailed { key, source, .. } => {
            assert_eq!(key, "missing");
            assert_eq!(source.status(), Some(StatusCode::NOT_FOUND));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn list_objects_returns_every_key_under_prefix() {
    let (store, backend) = setup();
    for key in ["backups/b1/a", "backups/b1/b", "backups/b2/a", "restores/r1/a"] {
        backend.insert(BUCKET, key, "x").await;
    }

    let keys = store.list_objects(BUCKET, "backups/").await.unwrap();
    assert_eq!(keys, vec!["backups/b1/a", "backups/b1/b", "backups/b2/a"]);

    let none = store.list_objects(BUCKET, "nothing/").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn list_common_prefixes_returns_only_object_keys() {
    let (store, backend) = setup();
    for key in ["backups/index.json", "backups/b1/a", "backups/b2/a"] {
        backend.insert(BUCKET, key, "x").await;
    }

    let keys = store
        .list_common_prefixes(BUCKET, "backups/", "/")
        .await
        .unwrap();
    assert_eq!(keys, vec!["backups/index.json"]);
}

#[tokio::test]
async fn listing_follows_pagination() {
    let (store, backend) = setup();
    backend.set_page_size(2).await;
    let expected: Vec<String> = (0..7).map(|i| format!("backups/{i:02}")).collect();
    for key in &expected {
        backend.insert(BUCKET, key, "x").await;
    }

    let keys = store.list_objects(BUCKET, "backups/").await.unwrap();
    assert_eq!(keys, expected);
    assert_eq!(backend.calls(Operation::List).await, 4);
}

#[tokio::test]
async fn listing_failure_is_list_failed() {
    let (store, backend) = setup();
    backend
        .inject_fault(Operation::List, Fault::Transport("timeout".to_string()))
        .await;

    let err = store.list_objects(BUCKET, "backups/").await.unwrap_err();
    match err {
        StorageError::ListFailed { bucket, prefix, .. } => {
            assert_eq!(bucket, BUCKET);
            assert_eq!(prefix, "backups/");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn signed_url_needs_positive_ttl() {
    let (store, _) = setup();

    let url = store
        .create_signed_url(BUCKET, "backups/b1.tar.gz", Duration::from_secs(600))
        .await
        .unwrap();
    assert!(url.starts_with("memory://backups-1250000000/backups/b1.tar.gz?"));

    let err = store
        .create_signed_url(BUCKET, "backups/b1.tar.gz", Duration::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::SignFailed { .. }));
}

#[tokio::test]
async fn invalid_names_never_reach_the_backend() {
    let (store, backend) = setup();

    let err = store.object_exists("NoAppId", "k").await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidBucket { .. }));

    let err = store.object_exists(BUCKET, "").await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey { .. }));

    assert_eq!(backend.calls(Operation::Head).await, 0);
}
