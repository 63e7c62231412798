use crate::domain::errors::ValidationError;

/// A validated object key within a bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// COS caps object keys at 850 bytes.
    pub const MAX_LEN: usize = 850;

    /// Rejects empty, oversized or control-character keys.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let key: String = value.into();
        let control = key.chars().find(|c| c.is_control());
        match key.len() {
            0 => Err(ValidationError::EmptyObjectKey),
            len if len > Self::MAX_LEN => Err(ValidationError::ObjectKeyTooLong {
                actual: len,
                max: Self::MAX_LEN,
            }),
            _ => match control {
                Some(c) => Err(ValidationError::InvalidObjectKeyCharacter(c)),
                None => Ok(Self(key)),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
