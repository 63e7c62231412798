// Backend implementations
pub mod cos;
pub mod memory;

pub use cos::{CosBackendFactory, CosEndpoint};
pub use memory::{Fault, InMemoryBackend, Operation};
