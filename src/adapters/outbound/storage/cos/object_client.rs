use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use s3::bucket::Bucket;
use tokio_util::io::StreamReader;
use tracing::debug;

use super::connection::{status_code, transport_error, CosConnection};
use crate::domain::{
    constants::REQUEST_ID_HEADER,
    errors::BackendError,
    models::Credentials,
    value_objects::{BucketName, ObjectKey},
};
use crate::ports::storage::{BackendResponse, ObjectBackend, ObjectBody};

/// Object operations against a single COS bucket
pub struct CosObjectClient {
    connection: Arc<CosConnection>,
    name: BucketName,
    bucket: Box<Bucket>,
}

impl CosObjectClient {
    pub fn new(connection: Arc<CosConnection>, name: BucketName) -> Result<Self, BackendError> {
        let bucket = connection.bucket(&name)?;
        Ok(Self {
            connection,
            name,
            bucket,
        })
    }
}

fn trim_etag(etag: String) -> String {
    etag.trim_matches('"').to_string()
}

#[async_trait]
impl ObjectBackend for CosObjectClient {
    async fn put(
        &self,
        key: &ObjectKey,
        mut body: ObjectBody,
    ) -> Result<BackendResponse, BackendError> {
        let response = self
            .bucket
            .put_object_stream(&mut body, key.as_str())
            .await
            .map_err(transport_error)?;
        let status = status_code(response.status_code())?;
        debug!(bucket = %self.name, key = %key, %status, "COS put answered");

        Ok(BackendResponse {
            status,
            request_id: None,
            etag: None,
        })
    }

    async fn head(&self, key: &ObjectKey) -> Result<BackendResponse, BackendError> {
        let (head, code) = self
            .bucket
            .head_object(key.as_str())
            .await
            .map_err(transport_error)?;
        let status = status_code(code)?;
        debug!(bucket = %self.name, key = %key, %status, "COS head answered");

        Ok(BackendResponse {
            status,
            request_id: None,
            etag: head.e_tag.map(trim_etag),
        })
    }

    async fn get(&self, key: &ObjectKey) -> Result<ObjectBody, BackendError> {
        let response = self
            .bucket
            .get_object_stream(key.as_str())
            .await
            .map_err(transport_error)?;
        let status = status_code(response.status_code)?;
        debug!(bucket = %self.name, key = %key, %status, "COS get answered");
        if !status.is_success() {
            return Err(BackendError::from_status(status));
        }

        let stream = response.bytes.map_err(std::io::Error::other);
        Ok(Box::new(StreamReader::new(stream)))
    }

    async fn delete(&self, key: &ObjectKey) -> Result<BackendResponse, BackendError> {
        let response = self
            .bucket
            .delete_object(key.as_str())
            .await
            .map_err(transport_error)?;
        let status = status_code(response.status_code())?;
        debug!(bucket = %self.name, key = %key, %status, "COS delete answered");

        Ok(BackendResponse {
            status,
            request_id: response.headers().get(REQUEST_ID_HEADER).cloned(),
            etag: None,
        })
    }

    async fn presigned_get(
        &self,
        key: &ObjectKey,
        credentials: &Credentials,
        ttl: Duration,
    ) -> Result<String, BackendError> {
        if ttl.is_zero() {
            return Err(BackendError::InvalidRequest(
                "signed URL lifetime must be positive".to_string(),
            ));
        }
        let expiry = u32::try_from(ttl.as_secs()).map_err(|_| {
            BackendError::InvalidRequest(format!("signed URL lifetime {:?} is too long", ttl))
        })?;

        let signer = self.connection.bucket_signed_by(&self.name, credentials)?;
        signer
            .presign_get(key.as_str(), expiry, None)
            .await
            .map_err(|e| BackendError::InvalidRequest(e.to_string()))
    }
}
