use std::collections::HashMap;

use crate::domain::{
    constants::{INSECURE_SKIP_TLS_VERIFY_KEY, RECOGNIZED_CONFIG_KEYS, REGION_KEY},
    errors::ConfigError,
};

/// Validated object store configuration, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    region: String,
    insecure_skip_tls_verify: bool,
}

impl StoreConfig {
    /// Validate the host's configuration map.
    ///
    /// Unknown keys are rejected first, then `region` must be non-empty.
    /// `insecureSkipTLSVerify` defaults to `true` when absent or empty.
    pub fn from_map(config: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut unknown: Vec<String> = config
            .keys()
            .filter(|key| !RECOGNIZED_CONFIG_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            return Err(ConfigError::UnknownKeys { keys: unknown });
        }

        let region = match config.get(REGION_KEY) {
            Some(region) if !region.is_empty() => region.clone(),
            _ => return Err(ConfigError::MissingRegion),
        };

        let insecure_skip_tls_verify = match config.get(INSECURE_SKIP_TLS_VERIFY_KEY) {
            Some(value) if !value.is_empty() => {
                parse_bool(value).ok_or_else(|| ConfigError::InvalidBoolean {
                    key: INSECURE_SKIP_TLS_VERIFY_KEY,
                    value: value.clone(),
                })?
            }
            _ => true,
        };

        Ok(Self {
            region,
            insecure_skip_tls_verify,
        })
    }

    pub fn new(region: impl Into<String>, insecure_skip_tls_verify: bool) -> Self {
        Self {
            region: region.into(),
            insecure_skip_tls_verify,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn insecure_skip_tls_verify(&self) -> bool {
        self.insecure_skip_tls_verify
    }

    /// The flag selects the endpoint scheme, as the provider's URL builder does
    pub fn scheme(&self) -> &'static str {
        if self.insecure_skip_tls_verify {
            "https"
        } else {
            "http"
        }
    }
}

/// Parse the boolean spellings the host's own tooling accepts
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_region_only_defaults_to_skip_verify() {
        let cfg = StoreConfig::from_map(&config(&[("region", "ap-guangzhou")])).unwrap();
        assert_eq!(cfg.region(), "ap-guangzhou");
        assert!(cfg.insecure_skip_tls_verify());
        assert_eq!(cfg.scheme(), "https");
    }

    #[test]
    fn test_missing_or_empty_region() {
        assert_eq!(
            StoreConfig::from_map(&HashMap::new()),
            Err(ConfigError::MissingRegion)
        );
        assert_eq!(
            StoreConfig::from_map(&config(&[("region", "")])),
            Err(ConfigError::MissingRegion)
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected_and_sorted() {
        let err = StoreConfig::from_map(&config(&[
            ("region", "ap-guangzhou"),
            ("zone", "1"),
            ("bucket", "b"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownKeys {
                keys: vec!["bucket".to_string(), "zone".to_string()]
            }
        );
    }

    #[test]
    fn test_boolean_values() {
        let spellings = [
            ("true", true),
            ("T", true),
            ("1", true),
            ("False", false),
            ("0", false),
        ];
        for (raw, expected) in spellings {
            let cfg = StoreConfig::from_map(&config(&[
                ("region", "ap-beijing"),
                ("insecureSkipTLSVerify", raw),
            ]))
            .unwrap();
            assert_eq!(cfg.insecure_skip_tls_verify(), expected, "value {raw}");
        }

        let cfg = StoreConfig::from_map(&config(&[
            ("region", "ap-beijing"),
            ("insecureSkipTLSVerify", ""),
        ]))
        .unwrap();
        assert!(cfg.insecure_skip_tls_verify());
    }

    #[test]
    fn test_invalid_boolean() {
        for raw in ["yes", "on", "tRuE", " true"] {
            let err = StoreConfig::from_map(&config(&[
                ("region", "ap-beijing"),
                ("insecureSkipTLSVerify", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidBoolean { .. }), "value {raw}");
        }
    }

    #[test]
    fn test_false_selects_plain_http() {
        let cfg = StoreConfig::new("ap-shanghai", false);
        assert_eq!(cfg.scheme(), "http");
    }
}
