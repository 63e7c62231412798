mod backend_errors;
mod config_errors;
mod restore_errors;
mod storage_errors;
mod validation_errors;

pub use backend_errors::*;
pub use config_errors::*;
pub use restore_errors::*;
pub use storage_errors::*;
pub use validation_errors::*;
