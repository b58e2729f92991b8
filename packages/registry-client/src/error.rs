use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors returned by [`RegistryClient`](crate::RegistryClient) calls.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Transport-level failure (connection refused, timeout, TLS, etc.).
    #[error("request to registry failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The registry answered with a non-success status.
    ///
    /// `message` is the response body when the backend provided one, or a
    /// generic fallback when the body was empty.
    #[error("registry returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl RegistryError {
    pub(crate) fn api(status: u16, body: String) -> Self {
        let message = if body.trim().is_empty() {
            "the registry service returned an error".to_string()
        } else {
            body
        };
        RegistryError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_backend_body() {
        let err = RegistryError::api(422, "yearEstablished out of range".into());
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("yearEstablished out of range"));
    }

    #[test]
    fn api_error_falls_back_on_empty_body() {
        let err = RegistryError::api(500, "  ".into());
        match err {
            RegistryError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "the registry service returned an error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
