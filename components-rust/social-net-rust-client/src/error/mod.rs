use common_lib::ValidationError;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No token is stored; nothing was sent.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Form-level check failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request was sent and failed, `message` is what the server said
    /// (or a per-operation fallback).
    #[error("{message}")]
    Request { status: Option<u16>, message: String },

    #[error("Session storage failed: {0}")]
    Session(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn request(status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::Request {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_authentication_required(&self) -> bool {
        matches!(self, ClientError::AuthenticationRequired)
    }
}
