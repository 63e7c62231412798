use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    adapters::outbound::storage::{CosEndpoint, InMemoryBackend},
    domain::constants::{INSECURE_SKIP_TLS_VERIFY_KEY, REGION_KEY},
    domain::errors::StorageError,
    ports::{actions::RestoreItemAction, storage::ObjectStore},
    services::{CosObjectStore, VolumeCapacityAction},
};

#[derive(Debug, Clone)]
struct AppConfig {
    storage_backend: StorageBackend,
    /// The map the host would hand to `init`
    store_config: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            store_config: HashMap::new(),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Process-local backend for tests and development
    InMemory,
    /// Tencent Cloud Object Storage, optionally through a custom endpoint
    /// addressed path-style
    Cos { endpoint: Option<String> },
}

/// Application services container
pub struct AppServices {
    pub object_store: Arc<dyn ObjectStore>,
    pub restore_action: Arc<dyn RestoreItemAction>,
    /// Handle on the in-memory backend, when one was selected
    pub memory_backend: Option<InMemoryBackend>,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Set one entry of the store configuration map
    pub fn with_store_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.store_config.insert(key.into(), value.into());
        self
    }

    /// Build and initialize the object store, plus the restore action
    pub fn build(self) -> Result<AppServices, AppError> {
        let (mut store, memory_backend) = match self.config.storage_backend {
            StorageBackend::InMemory => {
                let backend = InMemoryBackend::new();
                (
                    CosObjectStore::with_backends(Arc::new(backend.clone())),
                    Some(backend),
                )
            }
            StorageBackend::Cos { endpoint } => {
                let endpoint = endpoint.map_or_else(CosEndpoint::regional, CosEndpoint::custom);
                (CosObjectStore::new().with_endpoint(endpoint), None)
            }
        };

        store.init(&self.config.store_config)?;

        Ok(AppServices {
            object_store: Arc::new(store),
            restore_action: Arc::new(VolumeCapacityAction::new()),
            memory_backend,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage initialization error: {0}")]
    StorageInit(#[from] StorageError),
}

/// Create an in-memory application for testing and development
pub fn create_in_memory_app(region: &str) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_store_option(REGION_KEY, region)
        .build()
}

/// Create a COS-backed application
pub fn create_cos_app(
    region: &str,
    insecure_skip_tls_verify: bool,
    endpoint: Option<String>,
) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::Cos { endpoint })
        .with_store_option(REGION_KEY, region)
        .with_store_option(
            INSECURE_SKIP_TLS_VERIFY_KEY,
            insecure_skip_tls_verify.to_string(),
        )
        .build()
}
