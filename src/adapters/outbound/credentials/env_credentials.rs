use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::{
    constants::{CREDENTIALS_FILE_ENV, SECRET_ID_ENV, SECRET_KEY_ENV},
    errors::CredentialLoadError,
    models::Credentials,
};

/// Load the file named by `TENCENT_CREDENTIALS_FILE`, if set.
///
/// Entries in the file replace process variables of the same name.
pub fn load_override_file() -> Result<(), CredentialLoadError> {
    let path = match env::var_os(CREDENTIALS_FILE_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => return Ok(()),
    };

    dotenvy::from_path_override(&path).map_err(|e| CredentialLoadError {
        env: CREDENTIALS_FILE_ENV,
        path: path.clone(),
        source: Box::new(e),
    })?;

    debug!(path = %path.display(), "loaded credentials override file");
    Ok(())
}

/// Read the secret id/key pair from the environment.
///
/// Missing variables resolve to empty strings; the provider rejects them
/// when a request is made.
pub fn resolve_credentials() -> Credentials {
    Credentials::new(
        env::var(SECRET_ID_ENV).unwrap_or_default(),
        env::var(SECRET_KEY_ENV).unwrap_or_default(),
    )
}
