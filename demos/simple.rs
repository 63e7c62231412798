use cos_backup_store::prelude::*;
use serde_json::json;
use std::error::Error;
use std::io::Cursor;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Same adapter the host drives, over the in-memory backend
    let services = create_in_memory_app("ap-guangzhou")?;
    let store = services.object_store;
    let bucket = "velero-backups-1250000000";

    store
        .put_object(
            bucket,
            "backups/nightly/velero-backup.json",
            Box::new(Cursor::new(br#"{"phase":"Completed"}"#.to_vec())),
        )
        .await?;
    store
        .put_object(
            bucket,
            "backups/nightly/nightly.tar.gz",
            Box::new(Cursor::new(vec![0u8; 64])),
        )
        .await?;

    println!("objects under backups/:");
    for key in store.list_objects(bucket, "backups/").await? {
        println!("  {}", key);
    }
    println!(
        "nightly.tar.gz exists: {}",
        store
            .object_exists(bucket, "backups/nightly/nightly.tar.gz")
            .await?
    );
    println!(
        "signed URL: {}",
        store
            .create_signed_url(bucket, "backups/nightly/nightly.tar.gz", Duration::from_secs(600))
            .await?
    );

    store
        .delete_object(bucket, "backups/nightly/nightly.tar.gz")
        .await?;

    let claim = json!({
        "kind": "PersistentVolumeClaim",
        "metadata": { "name": "data" },
        "spec": { "resources": { "requests": { "storage": "5Gi" } } },
        "status": { "phase": "Bound" }
    });
    let restored = services.restore_action.execute(claim)?;
    println!("restored claim: {}", serde_json::to_string_pretty(&restored)?);

    Ok(())
}
