//! Error taxonomy for backend API calls.
//!
//! The distinctions matter for session handling: only an explicit 401
//! response means the session is gone, a transport failure must leave the
//! session untouched, and API-provided messages are the ones worth showing
//! to users.

/// Error produced by [`crate::http::ApiClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend explicitly rejected the credentials (HTTP 401). The
    /// global session-expiry hook has already run by the time callers see
    /// this variant.
    #[error("{}", message.as_deref().unwrap_or("Authentication required"))]
    Unauthorized { message: Option<String> },

    /// The backend answered with a non-success status other than 401,
    /// carrying its `detail` message when one was present.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed: DNS, connect, timeout. The backend was
    /// not reached, so nothing can be concluded about the session.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered 2xx but the body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message to show a user for this failure: the backend-provided
    /// text when there is one, otherwise the caller's generic fallback.
    pub fn surface_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthorized {
                message: Some(message),
            } => message.clone(),
            ApiError::Api { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// True when the request never reached the backend.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
