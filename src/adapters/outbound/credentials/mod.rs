//! Credential Provider: secrets come from the process environment,
//! optionally overridden by a `KEY=VALUE` file.

mod env_credentials;

pub use env_credentials::{load_override_file, resolve_credentials};
