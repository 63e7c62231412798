//! Tencent Cloud Object Storage through its S3-compatible API.

mod bucket_client;
mod connection;
mod endpoint;
mod factory;
mod object_client;

pub use bucket_client::CosBucketClient;
pub use connection::CosConnection;
pub use endpoint::CosEndpoint;
pub use factory::CosBackendFactory;
pub use object_client::CosObjectClient;
