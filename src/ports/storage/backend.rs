use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use tokio::io::AsyncRead;

use crate::domain::{
    errors::BackendError,
    models::{Credentials, ListBucketResult, ListOptions},
    value_objects::{BucketName, ObjectKey},
};

/// Object payload, read by the consumer and dropped when done
pub type ObjectBody = Box<dyn AsyncRead + Send + Unpin>;

/// What a provider call answered with, when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub etag: Option<String>,
}

/// Object operations against one bucket.
///
/// `put`, `head` and `delete` hand back whatever status the provider
/// answered with; interpreting it is left to the caller.
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    async fn put(&self, key: &ObjectKey, body: ObjectBody)
        -> Result<BackendResponse, BackendError>;

    async fn head(&self, key: &ObjectKey) -> Result<BackendResponse, BackendError>;

    async fn get(&self, key: &ObjectKey) -> Result<ObjectBody, BackendError>;

    async fn delete(&self, key: &ObjectKey) -> Result<BackendResponse, BackendError>;

    /// Sign a GET URL locally with `credentials`; no request is sent
    async fn presigned_get(
        &self,
        key: &ObjectKey,
        credentials: &Credentials,
        ttl: Duration,
    ) -> Result<String, BackendError>;
}

/// Bucket-level operations against one bucket
#[async_trait]
pub trait BucketBackend: Send + Sync {
    /// Fetch one page of the listing
    async fn list(&self, options: &ListOptions) -> Result<ListBucketResult, BackendError>;
}

/// Derives bucket-scoped clients.
///
/// Construction is pure: no request is sent until an operation is invoked
/// on the returned client, and nothing is cached between calls.
pub trait BackendFactory: Send + Sync {
    fn object_client(&self, bucket: &BucketName) -> Result<Box<dyn ObjectBackend>, BackendError>;

    fn bucket_client(&self, bucket: &BucketName) -> Result<Box<dyn BucketBackend>, BackendError>;
}
