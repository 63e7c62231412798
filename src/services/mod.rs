mod cos_object_store;
mod volume_capacity_action;

pub use cos_object_store::CosObjectStore;
pub use volume_capacity_action::VolumeCapacityAction;
