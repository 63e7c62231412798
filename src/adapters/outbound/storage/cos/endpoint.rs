use s3::Region;

use crate::domain::{constants::DEFAULT_ENDPOINT_TEMPLATE, errors::BackendError};

/// Where COS requests are sent.
///
/// The regional endpoint addresses buckets as subdomains. A custom endpoint
/// (a gateway, a local fake) carries the bucket as the first path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosEndpoint {
    template: String,
    path_style: bool,
}

impl Default for CosEndpoint {
    fn default() -> Self {
        Self::regional()
    }
}

impl CosEndpoint {
    /// `cos.{region}.myqcloud.com`
    pub fn regional() -> Self {
        Self {
            template: DEFAULT_ENDPOINT_TEMPLATE.to_string(),
            path_style: false,
        }
    }

    /// Any other endpoint; `{region}` is still substituted
    pub fn custom(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            path_style: true,
        }
    }

    pub fn path_style(&self) -> bool {
        self.path_style
    }

    /// Resolve the template for `region`.
    ///
    /// `scheme` is prefixed unless the template already names one.
    pub fn region(&self, region: &str, scheme: &str) -> Result<Region, BackendError> {
        if region.is_empty() {
            return Err(BackendError::InvalidRequest("region is empty".to_string()));
        }

        let endpoint = self.template.replace("{region}", region);
        let endpoint = if endpoint.contains("://") {
            endpoint
        } else {
            format!("{}://{}", scheme, endpoint)
        };

        Ok(Region::Custom {
            region: region.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint_of(region: Region) -> String {
        match region {
            Region::Custom { endpoint, .. } => endpoint,
            other => panic!("unexpected region: {:?}", other),
        }
    }

    #[test]
    fn test_regional_endpoint_follows_scheme() {
        let endpoint = CosEndpoint::regional();
        assert!(!endpoint.path_style());
        assert_eq!(
            endpoint_of(endpoint.region("ap-guangzhou", "https").unwrap()),
            "https://cos.ap-guangzhou.myqcloud.com"
        );
        assert_eq!(
            endpoint_of(endpoint.region("ap-guangzhou", "http").unwrap()),
            "http://cos.ap-guangzhou.myqcloud.com"
        );
    }

    #[test]
    fn test_custom_endpoint_keeps_its_scheme() {
        let endpoint = CosEndpoint::custom("http://127.0.0.1:9000/");
        assert!(endpoint.path_style());
        assert_eq!(
            endpoint_of(endpoint.region("ap-beijing", "https").unwrap()),
            "http://127.0.0.1:9000"
        );

        let accelerated = CosEndpoint::custom("cos.accelerate.myqcloud.com");
        assert_eq!(
            endpoint_of(accelerated.region("ap-beijing", "https").unwrap()),
            "https://cos.accelerate.myqcloud.com"
        );
    }

    #[test]
    fn test_empty_region_is_rejected() {
        assert!(matches!(
            CosEndpoint::regional().region("", "https"),
            Err(BackendError::InvalidRequest(_))
        ));
    }
}
