use serde_json::Value;

use crate::domain::errors::RestoreError;

/// Which resources a restore action wants to see
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSelector {
    pub included_resources: Vec<String>,
}

impl ResourceSelector {
    /// An empty selector matches every resource
    pub fn matches(&self, resource: &str) -> bool {
        self.included_resources.is_empty()
            || self
                .included_resources
                .iter()
                .any(|included| included.eq_ignore_ascii_case(resource))
    }
}

/// Port for mutating manifests before the host re-applies them
pub trait RestoreItemAction: Send + Sync {
    fn applies_to(&self) -> ResourceSelector;

    /// Returns the manifest to restore in place of `item`
    fn execute(&self, item: Value) -> Result<Value, RestoreError>;
}
