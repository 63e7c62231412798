use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::ObjectBody;
use crate::domain::errors::StorageResult;

/// Port the backup/restore host drives.
///
/// The host calls `init` once with its configuration map, then invokes the
/// remaining operations, interpreting any error as a failed backup or
/// restore step. Nothing here retries.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Validate configuration and prepare the shared authenticated transport
    fn init(&mut self, config: &HashMap<String, String>) -> StorageResult<()>;

    /// Create or overwrite `key` with the bytes read from `body`
    async fn put_object(&self, bucket: &str, key: &str, body: ObjectBody) -> StorageResult<()>;

    /// `Ok(false)` only when the provider answered with a 4xx status
    async fn object_exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;

    /// Open the object for reading from offset zero
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<ObjectBody>;

    /// Keys matched by a prefix + delimiter query.
    ///
    /// Only object keys are returned; grouped prefixes are not.
    async fn list_common_prefixes(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: &str,
    ) -> StorageResult<Vec<String>>;

    /// Every key starting with `prefix`, in provider order
    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<String>>;

    /// Succeeds only on `204 No Content`
    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()>;

    /// A GET URL for `key` that expires after `ttl`
    async fn create_signed_url(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> StorageResult<String>;
}
