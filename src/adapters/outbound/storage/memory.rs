use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use tokio::io::AsyncReadExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    errors::BackendError,
    models::{CommonPrefix, Credentials, ListBucketResult, ListOptions, ListedObject},
    value_objects::{BucketName, ObjectKey},
};
use crate::ports::storage::{
    BackendFactory, BackendResponse, BucketBackend, ObjectBackend, ObjectBody,
};

/// Provider call a fault can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Put,
    Head,
    Get,
    Delete,
    List,
    Sign,
}

/// Injected provider behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The call fails before any response is read
    Transport(String),
    /// The provider answers with this error status
    Status(StatusCode),
    /// The call succeeds at the transport level with this status.
    /// Only meaningful for put, head and delete.
    Respond(StatusCode),
}

/// In-memory provider for testing and development.
///
/// Buckets spring into existence on first write. Listing honours
/// `page_size` so pagination can be exercised.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    data: Arc<RwLock<BackendData>>,
}

#[derive(Default)]
struct BackendData {
    buckets: HashMap<String, BTreeMap<String, StoredObject>>,
    faults: HashMap<Operation, Fault>,
    calls: HashMap<Operation, usize>,
    page_size: Option<usize>,
}

#[derive(Clone)]
struct StoredObject {
    data: Bytes,
    etag: String,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap every listing page at `page_size` entries
    pub async fn set_page_size(&self, page_size: usize) {
        self.data.write().await.page_size = Some(page_size.max(1));
    }

    pub async fn inject_fault(&self, operation: Operation, fault: Fault) {
        self.data.write().await.faults.insert(operation, fault);
    }

    pub async fn clear_faults(&self) {
        self.data.write().await.faults.clear();
    }

    /// Store an object directly, bypassing fault injection
    pub async fn insert(&self, bucket: &str, key: &str, data: impl Into<Bytes>) {
        let data = data.into();
        let etag = format!("{:x}", md5::compute(&data));
        self.data
            .write()
            .await
            .buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), StoredObject { data, etag });
    }

    pub async fn contents(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.data
            .read()
            .await
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .map(|object| object.data.clone())
    }

    /// How many times `operation` reached the provider
    pub async fn calls(&self, operation: Operation) -> usize {
        self.data
            .read()
            .await
            .calls
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }

    fn client(&self, bucket: &BucketName) -> InMemoryClient {
        InMemoryClient {
            data: Arc::clone(&self.data),
            bucket: bucket.as_str().to_string(),
        }
    }
}

impl BackendFactory for InMemoryBackend {
    fn object_client(&self, bucket: &BucketName) -> Result<Box<dyn ObjectBackend>, BackendError> {
        Ok(Box::new(self.client(bucket)))
    }

    fn bucket_client(&self, bucket: &BucketName) -> Result<Box<dyn BucketBackend>, BackendError> {
        Ok(Box::new(self.client(bucket)))
    }
}

struct InMemoryClient {
    data: Arc<RwLock<BackendData>>,
    bucket: String,
}

fn request_id() -> Option<String> {
    Some(Uuid::new_v4().to_string())
}

impl InMemoryClient {
    /// Record the call and return the injected fault, if any
    async fn enter(&self, operation: Operation) -> Option<Fault> {
        let mut data = self.data.write().await;
        *data.calls.entry(operation).or_insert(0) += 1;
        data.faults.get(&operation).cloned()
    }

    /// Map a fault to the outcome the caller sees.
    ///
    /// `Ok(Some(_))` is a non-error response that short-circuits the call.
    fn apply(fault: Option<Fault>) -> Result<Option<BackendResponse>, BackendError> {
        match fault {
            None => Ok(None),
            Some(Fault::Transport(message)) => Err(BackendError::Transport(message.into())),
            Some(Fault::Status(status)) => Err(BackendError::from_status(status)),
            Some(Fault::Respond(status)) => Ok(Some(BackendResponse {
                status,
                request_id: request_id(),
                etag: None,
            })),
        }
    }

    /// Like `apply`, for calls that have no response value of their own
    fn apply_strict(fault: Option<Fault>) -> Result<(), BackendError> {
        match Self::apply(fault)? {
            None => Ok(()),
            Some(response) => Err(BackendError::from_status(response.status)),
        }
    }
}

#[async_trait]
impl ObjectBackend for InMemoryClient {
    async fn put(
        &self,
        key: &ObjectKey,
        mut body: ObjectBody,
    ) -> Result<BackendResponse, BackendError> {
        if let Some(response) = Self::apply(self.enter(Operation::Put).await)? {
            return Ok(response);
        }

        let mut data = Vec::new();
        body.read_to_end(&mut data)
            .await
            .map_err(|e| BackendError::Transport(Box::new(e)))?;
        let etag = format!("{:x}", md5::compute(&data));

        self.data
            .write()
            .await
            .buckets
            .entry(self.bucket.clone())
            .or_default()
            .insert(
                key.as_str().to_string(),
                StoredObject {
                    data: Bytes::from(data),
                    etag: etag.clone(),
                },
            );

        Ok(BackendResponse {
            status: StatusCode::OK,
            request_id: request_id(),
            etag: Some(etag),
        })
    }

    async fn head(&self, key: &ObjectKey) -> Result<BackendResponse, BackendError> {
        if let Some(response) = Self::apply(self.enter(Operation::Head).await)? {
            return Ok(response);
        }

        let data = self.data.read().await;
        let object = data
            .buckets
            .get(&self.bucket)
            .and_then(|objects| objects.get(key.as_str()))
            .ok_or_else(|| BackendError::from_status(StatusCode::NOT_FOUND))?;

        Ok(BackendResponse {
            status: StatusCode::OK,
            request_id: request_id(),
            etag: Some(object.etag.clone()),
        })
    }

    async fn get(&self, key: &ObjectKey) -> Result<ObjectBody, BackendError> {
        Self::apply_strict(self.enter(Operation::Get).await)?;

        let data = self.data.read().await;
        let object = data
            .buckets
            .get(&self.bucket)
            .and_then(|objects| objects.get(key.as_str()))
            .ok_or_else(|| BackendError::from_status(StatusCode::NOT_FOUND))?;

        Ok(Box::new(Cursor::new(object.data.clone())))
    }

    async fn delete(&self, key: &ObjectKey) -> Result<BackendResponse, BackendError> {
        if let Some(response) = Self::apply(self.enter(Operation::Delete).await)? {
            return Ok(response);
        }

        // Deleting a missing key still answers 204
        if let Some(objects) = self.data.write().await.buckets.get_mut(&self.bucket) {
            objects.remove(key.as_str());
        }

        Ok(BackendResponse {
            status: StatusCode::NO_CONTENT,
            request_id: request_id(),
            etag: None,
        })
    }

    async fn presigned_get(
        &self,
        key: &ObjectKey,
        credentials: &Credentials,
        ttl: Duration,
    ) -> Result<String, BackendError> {
        Self::apply_strict(self.enter(Operation::Sign).await)?;
        if ttl.is_zero() {
            return Err(BackendError::InvalidRequest(
                "signed URL lifetime must be positive".to_string(),
            ));
        }

        let path: Vec<_> = key
            .as_str()
            .split('/')
            .map(urlencoding::encode)
            .collect();
        Ok(format!(
            "memory://{}/{}?q-ak={}&expires={}",
            self.bucket,
            path.join("/"),
            urlencoding::encode(credentials.secret_id()),
            ttl.as_secs()
        ))
    }
}

#[async_trait]
impl BucketBackend for InMemoryClient {
    async fn list(&self, options: &ListOptions) -> Result<ListBucketResult, BackendError> {
        Self::apply_strict(self.enter(Operation::List).await)?;

        let data = self.data.read().await;
        let mut result = ListBucketResult {
            name: self.bucket.clone(),
            prefix: options.prefix.clone(),
            marker: options.marker.clone().unwrap_or_default(),
            ..Default::default()
        };
        let Some(objects) = data.buckets.get(&self.bucket) else {
            return Ok(result);
        };

        let limit = data
            .page_size
            .into_iter()
            .chain(options.max_keys.map(|max| max as usize))
            .min()
            .unwrap_or(usize::MAX)
            .max(1);
        let delimiter = options.delimiter.as_deref().filter(|d| !d.is_empty());
        let marker = options.marker.as_deref().unwrap_or("");

        let mut entries = 0;
        let mut last_entry = String::new();
        for (key, object) in objects.range::<str, _>((
            std::ops::Bound::Excluded(marker),
            std::ops::Bound::Unbounded,
        )) {
            let Some(rest) = key.strip_prefix(options.prefix.as_str()) else {
                continue;
            };

            // Keys sharing a delimited segment collapse into one prefix
            let grouped = delimiter.and_then(|d| {
                rest.find(d)
                    .map(|at| format!("{}{}", options.prefix, &rest[..at + d.len()]))
            });
            if let Some(prefix) = &grouped {
                if result.common_prefixes.last().map(|p| &p.prefix) == Some(prefix) {
                    continue;
                }
                if prefix.as_str() <= marker {
                    continue;
                }
            }

            if entries == limit {
                result.is_truncated = true;
                result.next_marker = Some(last_entry);
                break;
            }
            entries += 1;

            match grouped {
                Some(prefix) => {
                    last_entry = prefix.clone();
                    result.common_prefixes.push(CommonPrefix { prefix });
                }
                None => {
                    last_entry = key.clone();
                    result.contents.push(ListedObject {
                        key: key.clone(),
                        size: object.data.len() as u64,
                        last_modified: None,
                    });
                }
            }
        }

        Ok(result)
    }
}
