pub mod credentials;
pub mod listing;
pub mod store_config;

pub use credentials::Credentials;
pub use listing::{CommonPrefix, ListBucketResult, ListOptions, ListedObject};
pub use store_config::{parse_bool, StoreConfig};
