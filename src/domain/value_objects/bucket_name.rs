use crate::domain::errors::ValidationError;

/// A validated COS bucket name, `<name>-<appid>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    /// Longest `<name>-<appid>` COS accepts as a DNS label.
    pub const MAX_LEN: usize = 63;

    /// Checks the COS naming rules and wraps the name.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let name: String = value.into();
        let (first, last) = match (name.chars().next(), name.chars().last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ValidationError::EmptyBucketName),
        };

        if name.len() > Self::MAX_LEN {
            return Err(ValidationError::BucketNameTooLong {
                actual: name.len(),
                max: Self::MAX_LEN,
            });
        }
        if !is_alnum(first) {
            return Err(ValidationError::BucketNameInvalidStart);
        }
        if !is_alnum(last) {
            return Err(ValidationError::BucketNameInvalidEnd);
        }
        if let Some(bad) = name.chars().find(|&c| !is_alnum(c) && c != '-') {
            return Err(ValidationError::BucketNameInvalidCharacter(bad));
        }
        if !name.contains('-') {
            return Err(ValidationError::BucketNameMissingAppId);
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for BucketName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
