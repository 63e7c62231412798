/// Secret id/key pair used to sign COS requests
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    secret_id: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn is_empty(&self) -> bool {
        self.secret_id.is_empty() || self.secret_key.is_empty()
    }

    /// The secret id with everything but its last four characters hidden
    pub fn masked_id(&self) -> String {
        let visible = self.secret_id.len().saturating_sub(4);
        match self.secret_id.get(visible..) {
            Some(tail) if visible > 0 => format!("{}{}", "*".repeat(visible), tail),
            _ => "*".repeat(self.secret_id.len()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.masked_id())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
