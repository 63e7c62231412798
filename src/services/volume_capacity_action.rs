use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::{
    domain::{
        constants::{
            KIND_KEY, MIN_VOLUME_SIZE, MIN_VOLUME_SIZE_BYTES, PERSISTENT_VOLUME_CLAIM_KIND,
            PERSISTENT_VOLUME_KIND, RESTORE_ANNOTATION, RESTORE_ANNOTATION_VALUE,
        },
        errors::RestoreError,
        value_objects::Quantity,
    },
    ports::actions::{ResourceSelector, RestoreItemAction},
};

const CLAIM_STORAGE_PATH: &[&str] = &["spec", "resources", "requests", "storage"];
const VOLUME_STORAGE_PATH: &[&str] = &["spec", "capacity", "storage"];

/// Raises restored volume claims and volumes to the smallest size COS-backed
/// disks accept, and clears the status the old cluster assigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeCapacityAction;

impl VolumeCapacityAction {
    pub fn new() -> Self {
        Self
    }
}

impl RestoreItemAction for VolumeCapacityAction {
    fn applies_to(&self) -> ResourceSelector {
        ResourceSelector {
            included_resources: vec!["pvc".to_string(), "persistentvolume".to_string()],
        }
    }

    fn execute(&self, mut item: Value) -> Result<Value, RestoreError> {
        let kind = item
            .get(KIND_KEY)
            .and_then(Value::as_str)
            .ok_or(RestoreError::MissingKind(KIND_KEY))?
            .to_string();

        // Path to the requested size, and the `spec` entry replaced on resize
        let (path, replaced) = match kind.as_str() {
            PERSISTENT_VOLUME_CLAIM_KIND => (CLAIM_STORAGE_PATH, "resources"),
            PERSISTENT_VOLUME_KIND => (VOLUME_STORAGE_PATH, "capacity"),
            _ => {
                debug!(kind = %kind, "manifest passed through unchanged");
                return Ok(item);
            }
        };

        let size = storage_bytes(&item, path)?;
        if size <= MIN_VOLUME_SIZE_BYTES {
            let replacement = match replaced {
                "resources" => json!({ "requests": { "storage": MIN_VOLUME_SIZE } }),
                _ => json!({ "storage": MIN_VOLUME_SIZE }),
            };
            object_field(&mut item, "spec")?.insert(replaced.to_string(), replacement);
            root(&mut item)?.insert("status".to_string(), json!({}));
            info!(
                kind = %kind,
                name = manifest_name(&item),
                from_bytes = size,
                to = MIN_VOLUME_SIZE,
                "raised volume size"
            );
        }

        let annotations = object_field(object_field_value(&mut item, "metadata")?, "annotations")?;
        annotations.insert(
            RESTORE_ANNOTATION.to_string(),
            Value::String(RESTORE_ANNOTATION_VALUE.to_string()),
        );
        Ok(item)
    }
}

/// Size at `path` in bytes; a missing field counts as zero
fn storage_bytes(item: &Value, path: &[&str]) -> Result<i64, RestoreError> {
    let field = path.join(".");
    let mut current = item;
    for segment in path {
        match current.get(segment) {
            Some(next) => current = next,
            None => return Ok(0),
        }
    }

    match current {
        Value::Null => Ok(0),
        Value::String(text) => Quantity::parse(text)
            .map(|quantity| quantity.value())
            .map_err(|source| RestoreError::InvalidQuantity { field, source }),
        Value::Number(number) => number.as_i64().ok_or(RestoreError::InvalidField {
            field,
            expected: "an integer quantity",
        }),
        _ => Err(RestoreError::InvalidField {
            field,
            expected: "a quantity",
        }),
    }
}

fn root(item: &mut Value) -> Result<&mut Map<String, Value>, RestoreError> {
    item.as_object_mut().ok_or(RestoreError::InvalidField {
        field: "<root>".to_string(),
        expected: "an object",
    })
}

/// The object at `item[name]`, created empty when absent or null
fn object_field<'a>(
    item: &'a mut Value,
    name: &str,
) -> Result<&'a mut Map<String, Value>, RestoreError> {
    object_field_value(item, name)?
        .as_object_mut()
        .ok_or_else(|| RestoreError::InvalidField {
            field: name.to_string(),
            expected: "an object",
        })
}

fn object_field_value<'a>(item: &'a mut Value, name: &str) -> Result<&'a mut Value, RestoreError> {
    let entry = root(item)?
        .entry(name.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if entry.is_null() {
        *entry = Value::Object(Map::new());
    }
    if !entry.is_object() {
        return Err(RestoreError::InvalidField {
            field: name.to_string(),
            expected: "an object",
        });
    }
    Ok(entry)
}

fn manifest_name(item: &Value) -> &str {
    item.pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector() {
        let selector = VolumeCapacityAction::new().applies_to();
        assert!(selector.matches("pvc"));
        assert!(selector.matches("PersistentVolume"));
        assert!(!selector.matches("pods"));
    }

    #[test]
    fn test_missing_storage_counts_as_zero() {
        let claim = json!({ "kind": "PersistentVolumeClaim", "spec": {} });
        let restored = VolumeCapacityAction.execute(claim).unwrap();
        assert_eq!(restored["spec"]["resources"]["requests"]["storage"], "10Gi");
    }

    #[test]
    fn test_exact_floor_is_rewritten() {
        let claim = json!({
            "kind": "PersistentVolumeClaim",
            "spec": {
                "resources": {
                    "requests": { "storage": "10Gi" },
                    "limits": { "storage": "10Gi" }
                }
            },
            "status": { "phase": "Bound" }
        });
        let restored = VolumeCapacityAction.execute(claim).unwrap();
        assert_eq!(restored["spec"]["resources"], json!({ "requests": { "storage": "10Gi" } }));
        assert_eq!(restored["status"], json!({}));
    }

    #[test]
    fn test_numeric_quantity() {
        let volume = json!({
            "kind": "PersistentVolume",
            "spec": { "capacity": { "storage": 1024 } }
        });
        let restored = VolumeCapacityAction.execute(volume).unwrap();
        assert_eq!(restored["spec"]["capacity"]["storage"], "10Gi");
    }

    #[test]
    fn test_bad_metadata() {
        let claim = json!({ "kind": "PersistentVolumeClaim", "metadata": "nope" });
        assert!(matches!(
            VolumeCapacityAction.execute(claim),
            Err(RestoreError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_missing_kind() {
        assert!(matches!(
            VolumeCapacityAction.execute(json!({ "spec": {} })),
            Err(RestoreError::MissingKind("kind"))
        ));
        assert!(matches!(
            VolumeCapacityAction.execute(json!({ "kind": 7 })),
            Err(RestoreError::MissingKind(_))
        ));
    }
}
