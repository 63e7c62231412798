pub mod actions;
pub mod storage;

// Re-export all port traits for convenience
pub use actions::{ResourceSelector, RestoreItemAction};
pub use storage::{
    BackendFactory, BackendResponse, BucketBackend, ObjectBackend, ObjectBody, ObjectStore,
};
