use http::StatusCode;
use thiserror::Error;

/// Failure reported by a bucket-scoped client.
///
/// `Transport` means no response was received at all; `Service` means the
/// provider answered with an error status. Callers rely on the distinction.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("service returned {status}")]
    Service {
        status: StatusCode,
        request_id: Option<String>,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl BackendError {
    pub fn from_status(status: StatusCode) -> Self {
        BackendError::Service {
            status,
            request_id: None,
        }
    }

    /// The response status, if a response was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Transport(_))
    }
}
