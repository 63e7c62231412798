use std::sync::Arc;

use super::bucket_client::CosBucketClient;
use super::connection::CosConnection;
use super::endpoint::CosEndpoint;
use super::object_client::CosObjectClient;
use crate::domain::{
    errors::BackendError,
    models::{Credentials, StoreConfig},
    value_objects::BucketName,
};
use crate::ports::storage::{BackendFactory, BucketBackend, ObjectBackend};

/// Derives COS clients that share one connection.
///
/// Every call opens a fresh bucket handle, so concurrent operations on
/// different buckets never share per-bucket state.
pub struct CosBackendFactory {
    connection: Arc<CosConnection>,
}

impl CosBackendFactory {
    pub fn new(
        credentials: &Credentials,
        config: StoreConfig,
        endpoint: CosEndpoint,
    ) -> Result<Self, BackendError> {
        Ok(Self {
            connection: Arc::new(CosConnection::new(credentials, config, endpoint)?),
        })
    }
}

impl BackendFactory for CosBackendFactory {
    fn object_client(&self, bucket: &BucketName) -> Result<Box<dyn ObjectBackend>, BackendError> {
        let client = CosObjectClient::new(Arc::clone(&self.connection), bucket.clone())?;
        Ok(Box::new(client))
    }

    fn bucket_client(&self, bucket: &BucketName) -> Result<Box<dyn BucketBackend>, BackendError> {
        Ok(Box::new(CosBucketClient::new(&self.connection, bucket.clone())?))
    }
}
