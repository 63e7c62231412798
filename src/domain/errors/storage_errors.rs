use http::StatusCode;
use thiserror::Error;

use super::{BackendError, ConfigError, CredentialLoadError, ValidationError};

/// Errors surfaced by the object store to its host.
///
/// Every variant names the bucket and key (or prefix) involved so the host
/// can log it verbatim.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object store is not initialized")]
    NotInitialized,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credentials(#[from] CredentialLoadError),

    #[error("error building COS client: {0}")]
    ClientInit(#[source] BackendError),

    #[error("invalid bucket {bucket:?}: {reason}")]
    InvalidBucket {
        bucket: String,
        reason: ValidationError,
    },

    #[error("invalid object key {key:?}: {reason}")]
    InvalidKey {
        key: String,
        reason: ValidationError,
    },

    /// No response was received, so the object's state is unknown
    #[error("error reaching bucket {bucket} for object {key}: {source}")]
    Transport {
        bucket: String,
        key: String,
        source: BackendError,
    },

    #[error("error putting object {key} in bucket {bucket}: {source}")]
    PutFailed {
        bucket: String,
        key: String,
        source: BackendError,
    },

    #[error("error checking whether object {key} exists in bucket {bucket} ({status}): {source}")]
    ExistenceCheckFailed {
        bucket: String,
        key: String,
        status: StatusCode,
        source: BackendError,
    },

    #[error("error getting object {key} from bucket {bucket}: {source}")]
    GetFailed {
        bucket: String,
        key: String,
        source: BackendError,
    },

    #[error("error listing bucket {bucket} with prefix {prefix:?}: {source}")]
    ListFailed {
        bucket: String,
        prefix: String,
        source: BackendError,
    },

    #[error("error deleting object {key} from bucket {bucket}: {source}")]
    DeleteFailed {
        bucket: String,
        key: String,
        source: BackendError,
    },

    #[error("delete of object {key} in bucket {bucket} was rejected with status {status}")]
    DeleteRejected {
        bucket: String,
        key: String,
        status: StatusCode,
    },

    #[error("error signing URL for object {key} in bucket {bucket}: {source}")]
    SignFailed {
        bucket: String,
        key: String,
        source: BackendError,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
