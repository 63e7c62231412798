use http::StatusCode;
use s3::bucket::Bucket;
use s3::error::S3Error;

use super::endpoint::CosEndpoint;
use crate::domain::{
    errors::BackendError,
    models::{Credentials, StoreConfig},
    value_objects::BucketName,
};

/// Credentials, region and endpoint resolved once at init.
///
/// Shared read-only by every bucket-scoped client derived afterwards.
pub struct CosConnection {
    credentials: s3::creds::Credentials,
    config: StoreConfig,
    endpoint: CosEndpoint,
}

impl CosConnection {
    pub fn new(
        credentials: &Credentials,
        config: StoreConfig,
        endpoint: CosEndpoint,
    ) -> Result<Self, BackendError> {
        // Resolve once so a bad template fails at init rather than per call
        endpoint.region(config.region(), config.scheme())?;
        Ok(Self {
            credentials: provider_credentials(credentials)?,
            config,
            endpoint,
        })
    }

    /// A handle on `bucket` signing with the init-time credentials
    pub fn bucket(&self, bucket: &BucketName) -> Result<Box<Bucket>, BackendError> {
        self.open(bucket, self.credentials.clone())
    }

    /// A handle on `bucket` signing with `credentials` instead
    pub fn bucket_signed_by(
        &self,
        bucket: &BucketName,
        credentials: &Credentials,
    ) -> Result<Box<Bucket>, BackendError> {
        self.open(bucket, provider_credentials(credentials)?)
    }

    fn open(
        &self,
        bucket: &BucketName,
        credentials: s3::creds::Credentials,
    ) -> Result<Box<Bucket>, BackendError> {
        let region = self
            .endpoint
            .region(self.config.region(), self.config.scheme())?;
        let handle = Bucket::new(bucket.as_str(), region, credentials).map_err(client_error)?;
        let handle = if self.endpoint.path_style() {
            handle.with_path_style()
        } else {
            handle
        };
        // COS pages listings with `marker`
        Ok(handle.with_listobjects_v1().into())
    }
}

fn provider_credentials(credentials: &Credentials) -> Result<s3::creds::Credentials, BackendError> {
    s3::creds::Credentials::new(
        Some(credentials.secret_id()),
        Some(credentials.secret_key()),
        None,
        None,
        None,
    )
    .map_err(|e| BackendError::InvalidRequest(format!("unusable credentials: {}", e)))
}

fn client_error(err: S3Error) -> BackendError {
    BackendError::InvalidRequest(err.to_string())
}

/// A failed call that produced no status to interpret
pub fn transport_error(err: S3Error) -> BackendError {
    BackendError::Transport(Box::new(err))
}

pub fn status_code(code: u16) -> Result<StatusCode, BackendError> {
    StatusCode::from_u16(code)
        .map_err(|_| BackendError::MalformedResponse(format!("invalid status code {}", code)))
}
