mod backend;
mod object_store;

pub use backend::{
    BackendFactory, BackendResponse, BucketBackend, ObjectBackend, ObjectBody,
};
pub use object_store::ObjectStore;
