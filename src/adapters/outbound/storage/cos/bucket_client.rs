use async_trait::async_trait;
use s3::bucket::Bucket;
use s3::serde_types::ListBucketResult as ProviderPage;

use super::connection::{status_code, transport_error, CosConnection};
use crate::domain::{
    errors::BackendError,
    models::{CommonPrefix, ListBucketResult, ListOptions, ListedObject},
    value_objects::BucketName,
};
use crate::ports::storage::BucketBackend;

/// Bucket listing against a single COS bucket
pub struct CosBucketClient {
    name: BucketName,
    bucket: Box<Bucket>,
}

impl CosBucketClient {
    pub fn new(connection: &CosConnection, name: BucketName) -> Result<Self, BackendError> {
        let bucket = connection.bucket(&name)?;
        Ok(Self { name, bucket })
    }
}

/// Carry one provider page over into the listing model.
///
/// Only the fields the page walk needs survive; the continuation point
/// is derived from the last key and prefix.
fn listing_page(
    name: &BucketName,
    options: &ListOptions,
    page: ProviderPage,
) -> ListBucketResult {
    ListBucketResult {
        name: name.to_string(),
        prefix: options.prefix.clone(),
        marker: options.marker.clone().unwrap_or_default(),
        next_marker: None,
        is_truncated: page.is_truncated,
        contents: page
            .contents
            .into_iter()
            .map(|object| ListedObject {
                key: object.key,
                size: object.size as u64,
                last_modified: Some(object.last_modified),
            })
            .collect(),
        common_prefixes: page
            .common_prefixes
            .unwrap_or_default()
            .into_iter()
            .map(|common| CommonPrefix {
                prefix: common.prefix,
            })
            .collect(),
    }
}

#[async_trait]
impl BucketBackend for CosBucketClient {
    async fn list(&self, options: &ListOptions) -> Result<ListBucketResult, BackendError> {
        let delimiter = options.delimiter.clone().filter(|d| !d.is_empty());
        let marker = options.marker.clone().filter(|m| !m.is_empty());
        let max_keys = options.max_keys.map(|max| max as usize);

        let (page, code) = self
            .bucket
            .list_page(options.prefix.clone(), delimiter, marker, None, max_keys)
            .await
            .map_err(transport_error)?;
        let status = status_code(code)?;
        if !status.is_success() {
            return Err(BackendError::from_status(status));
        }

        Ok(listing_page(&self.name, options, page))
    }
}
