mod restore_item_action;

pub use restore_item_action::{ResourceSelector, RestoreItemAction};
