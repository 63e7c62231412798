pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - value objects, models and errors
pub use domain::{
    BackendError,
    // Value objects
    BucketName,
    // Errors
    ConfigError,
    // Models
    Credentials,
    CredentialLoadError,
    ListBucketResult,
    ListOptions,
    ObjectKey,
    Quantity,
    RestoreError,
    StorageError,
    StorageResult,
    StoreConfig,
    ValidationError,
};

// Port types - interfaces the host drives and the backends implement
pub use ports::{
    BackendFactory, BackendResponse, BucketBackend, ObjectBackend, ObjectBody, ObjectStore,
    ResourceSelector, RestoreItemAction,
};

// Service implementations
pub use services::{CosObjectStore, VolumeCapacityAction};

// Application factory and configuration
pub use app::{
    create_cos_app, create_in_memory_app, AppBuilder, AppError, AppServices, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{
    CosBackendFactory, CosEndpoint, Fault, InMemoryBackend, Operation,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AppBuilder, AppServices, BucketName, CosObjectStore, InMemoryBackend, ObjectKey,
        ObjectStore, RestoreItemAction, StorageError, VolumeCapacityAction, create_cos_app,
        create_in_memory_app,
    };
}
