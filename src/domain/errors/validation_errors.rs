use std::fmt;

/// Rejections raised while building value objects from host input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyObjectKey,
    ObjectKeyTooLong { actual: usize, max: usize },
    InvalidObjectKeyCharacter(char),

    EmptyBucketName,
    BucketNameTooLong { actual: usize, max: usize },
    BucketNameInvalidStart,
    BucketNameInvalidEnd,
    BucketNameInvalidCharacter(char),
    /// COS bucket names are `<name>-<appid>`
    BucketNameMissingAppId,

    EmptyQuantity,
    InvalidQuantity(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ValidationError::*;

        match self {
            EmptyObjectKey => f.write_str("object key is empty"),
            ObjectKeyTooLong { actual, max } => {
                write!(f, "object key is {} bytes, COS allows at most {}", actual, max)
            }
            InvalidObjectKeyCharacter(c) => {
                write!(f, "object key contains control character {:?}", c)
            }
            EmptyBucketName => f.write_str("bucket name is empty"),
            BucketNameTooLong { actual, max } => {
                write!(f, "bucket name is {} characters, COS allows at most {}", actual, max)
            }
            BucketNameInvalidStart => {
                f.write_str("bucket name must begin with a lowercase letter or digit")
            }
            BucketNameInvalidEnd => {
                f.write_str("bucket name must finish with a lowercase letter or digit")
            }
            BucketNameInvalidCharacter(c) => write!(
                f,
                "bucket name contains {:?}; only a-z, 0-9 and '-' are accepted",
                c
            ),
            BucketNameMissingAppId => f.write_str("bucket name lacks its -<appid> suffix"),
            EmptyQuantity => f.write_str("storage quantity is empty"),
            InvalidQuantity(text) => write!(f, "{:?} is not a resource quantity", text),
        }
    }
}

impl std::error::Error for ValidationError {}
