use async_trait::async_trait;
use http::StatusCode;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    adapters::outbound::{
        credentials::{load_override_file, resolve_credentials},
        storage::{CosBackendFactory, CosEndpoint},
    },
    domain::{
        errors::{BackendError, StorageError, StorageResult},
        models::{ListOptions, StoreConfig},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::{BackendFactory, BucketBackend, ObjectBackend, ObjectBody, ObjectStore},
};

/// Object store backed by Tencent Cloud Object Storage.
///
/// `init` must succeed before any other operation; until then every
/// operation fails with `StorageError::NotInitialized`.
pub struct CosObjectStore {
    backends: Option<Arc<dyn BackendFactory>>,
    injected: bool,
    config: Option<StoreConfig>,
    endpoint: CosEndpoint,
}

impl Default for CosObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CosObjectStore {
    /// Create a store that talks to COS once initialized
    pub fn new() -> Self {
        Self {
            backends: None,
            injected: false,
            config: None,
            endpoint: CosEndpoint::regional(),
        }
    }

    /// Create a store over an already built backend.
    ///
    /// `init` still validates configuration and credentials but keeps this
    /// backend instead of building a COS transport.
    pub fn with_backends(backends: Arc<dyn BackendFactory>) -> Self {
        Self {
            backends: Some(backends),
            injected: true,
            ..Self::new()
        }
    }

    /// Point the store at a different endpoint, e.g. a gateway or a local fake
    pub fn with_endpoint(mut self, endpoint: CosEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Configuration accepted by the last successful `init`
    pub fn config(&self) -> Option<&StoreConfig> {
        self.config.as_ref()
    }

    fn backends(&self) -> StorageResult<&Arc<dyn BackendFactory>> {
        match (&self.config, &self.backends) {
            (Some(_), Some(backends)) => Ok(backends),
            _ => Err(StorageError::NotInitialized),
        }
    }

    fn object_client(
        &self,
        bucket: &str,
        key: &str,
    ) -> StorageResult<(Box<dyn ObjectBackend>, ObjectKey)> {
        let bucket_name = parse_bucket(bucket)?;
        let object_key = ObjectKey::new(key).map_err(|reason| StorageError::InvalidKey {
            key: key.to_string(),
            reason,
        })?;
        let client = self
            .backends()?
            .object_client(&bucket_name)
            .map_err(StorageError::ClientInit)?;
        Ok((client, object_key))
    }

    fn bucket_client(&self, bucket: &str) -> StorageResult<Box<dyn BucketBackend>> {
        let bucket_name = parse_bucket(bucket)?;
        self.backends()?
            .bucket_client(&bucket_name)
            .map_err(StorageError::ClientInit)
    }

    /// Collect matched object keys across every page of a listing
    async fn list_keys(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: Option<&str>,
    ) -> StorageResult<Vec<String>> {
        let client = self.bucket_client(bucket)?;
        let list_failed = |source| StorageError::ListFailed {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            source,
        };

        let mut keys = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let options = ListOptions::builder()
                .prefix(prefix)
                .maybe_delimiter(delimiter.map(str::to_string))
                .maybe_marker(marker.clone())
                .build();
            let page = client.list(&options).await.map_err(|e| {
                warn!(bucket, prefix, error = %e, "listing failed");
                list_failed(e)
            })?;
            keys.extend(page.contents.iter().map(|object| object.key.clone()));

            match page.continuation_marker() {
                Some(next) if marker.as_deref() != Some(next.as_str()) => marker = Some(next),
                Some(next) => {
                    return Err(list_failed(BackendError::MalformedResponse(format!(
                        "listing did not advance past marker {:?}",
                        next
                    ))));
                }
                None => break,
            }
        }

        debug!(bucket, prefix, count = keys.len(), "listed objects");
        Ok(keys)
    }
}

fn parse_bucket(bucket: &str) -> StorageResult<BucketName> {
    BucketName::new(bucket).map_err(|reason| StorageError::InvalidBucket {
        bucket: bucket.to_string(),
        reason,
    })
}

#[async_trait]
impl ObjectStore for CosObjectStore {
    fn init(&mut self, config: &HashMap<String, String>) -> StorageResult<()> {
        let store_config = StoreConfig::from_map(config)?;
        load_override_file()?;
        let credentials = resolve_credentials();

        info!(
            region = store_config.region(),
            insecure_skip_tls_verify = store_config.insecure_skip_tls_verify(),
            secret_id = %credentials.masked_id(),
            "initializing COS object store"
        );
        if credentials.is_empty() {
            warn!("COS credentials are empty; the provider will reject requests");
        }

        if !self.injected {
            let factory =
                CosBackendFactory::new(&credentials, store_config.clone(), self.endpoint.clone())
                    .map_err(StorageError::ClientInit)?;
            self.backends = Some(Arc::new(factory));
        }
        self.config = Some(store_config);
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: ObjectBody) -> StorageResult<()> {
        let (client, object_key) = self.object_client(bucket, key)?;
        let put_failed = |source| StorageError::PutFailed {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source,
        };

        let response = client.put(&object_key, body).await.map_err(|e| {
            warn!(bucket, key, error = %e, "put failed");
            put_failed(e)
        })?;
        if !response.status.is_success() {
            warn!(bucket, key, status = %response.status, "put rejected");
            return Err(put_failed(BackendError::from_status(response.status)));
        }

        debug!(bucket, key, request_id = ?response.request_id, "put object");
        Ok(())
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        let (client, object_key) = self.object_client(bucket, key)?;

        let status = match client.head(&object_key).await {
            Ok(response) => response.status,
            Err(e) => match e.status() {
                Some(status) => status,
                None => {
                    warn!(bucket, key, error = %e, "existence check got no response");
                    return Err(StorageError::Transport {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        source: e,
                    });
                }
            },
        };

        if status.is_server_error() {
            warn!(bucket, key, %status, "existence check failed");
            return Err(StorageError::ExistenceCheckFailed {
                bucket: bucket.to_string(),
                key: key.to_string(),
                status,
                source: BackendError::from_status(status),
            });
        }

        let exists = !status.is_client_error();
        debug!(bucket, key, %status, exists, "checked object");
        Ok(exists)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<ObjectBody> {
        let (client, object_key) = self.object_client(bucket, key)?;

        let body = client.get(&object_key).await.map_err(|e| {
            warn!(bucket, key, error = %e, "get failed");
            StorageError::GetFailed {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: e,
            }
        })?;

        debug!(bucket, key, "opened object");
        Ok(body)
    }

    async fn list_common_prefixes(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: &str,
    ) -> StorageResult<Vec<String>> {
        self.list_keys(bucket, prefix, Some(delimiter)).await
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<String>> {
        self.list_keys(bucket, prefix, None).await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        let (client, object_key) = self.object_client(bucket, key)?;

        let rejected = |status: StatusCode| {
            warn!(bucket, key, %status, "delete rejected");
            StorageError::DeleteRejected {
                bucket: bucket.to_string(),
                key: key.to_string(),
                status,
            }
        };

        // Any answered status other than 204 is a rejection, error statuses included
        let response = client.delete(&object_key).await.map_err(|e| match e.status() {
            Some(status) => rejected(status),
            None => {
                warn!(bucket, key, error = %e, "delete failed");
                StorageError::DeleteFailed {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    source: e,
                }
            }
        })?;
        if response.status != StatusCode::NO_CONTENT {
            return Err(rejected(response.status));
        }

        debug!(bucket, key, request_id = ?response.request_id, "deleted object");
        Ok(())
    }

    async fn create_signed_url(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> StorageResult<String> {
        let (client, object_key) = self.object_client(bucket, key)?;
        // Credentials are read again so rotated secrets apply to new URLs
        let credentials = resolve_credentials();

        let url = client
            .presigned_get(&object_key, &credentials, ttl)
            .await
            .map_err(|e| {
                warn!(bucket, key, error = %e, "signing failed");
                StorageError::SignFailed {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    source: e,
                }
            })?;

        debug!(bucket, key, ttl_secs = ttl.as_secs(), "signed URL");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::InMemoryBackend;

    #[tokio::test]
    async fn test_operations_before_init_fail() {
        let store = CosObjectStore::with_backends(Arc::new(InMemoryBackend::new()));

        let err = store
            .object_exists("backups-1250000000", "k")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotInitialized));

        let err = CosObjectStore::new()
            .list_objects("backups-1250000000", "")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotInitialized));
    }

    #[tokio::test]
    async fn test_invalid_names_fail_before_backend() {
        let store = CosObjectStore::new();

        let err = store.object_exists("Bad_Bucket", "k").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidBucket { .. }));

        let err = store.delete_object("backups-1250000000", "").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }));
    }
}
