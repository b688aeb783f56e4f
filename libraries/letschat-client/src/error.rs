//! Error types for the Let's Chat client.

use thiserror::Error;

/// Errors that can occur when talking to a Let's Chat server.
#[derive(Error, Debug)]
pub enum ChatClientError {
    /// Invalid server URL
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    /// An authenticated operation was attempted with no token held
    #[error("authentication required")]
    AuthRequired,

    /// Invalid credentials or expired/invalid token
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Referenced room, user or file does not exist server-side
    #[error("not found: {0}")]
    NotFound(String),

    /// Request payload rejected by the server
    #[error("request rejected: {0}")]
    Validation(String),

    /// Network or I/O failure; the caller may retry
    #[error("transfer failed: {0}")]
    Transfer(String),

    /// Response payload does not match the expected shape
    #[error("unexpected response: {0}")]
    Protocol(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ChatClientError>;

/// Map a transport-level failure onto the error taxonomy.
pub(crate) fn transport(err: reqwest::Error) -> ChatClientError {
    if err.is_decode() {
        ChatClientError::Protocol(err.to_string())
    } else {
        // Timeouts, connect failures and mid-body I/O all land here.
        ChatClientError::Transfer(err.to_string())
    }
}

/// Map a non-success HTTP status onto the error taxonomy.
///
/// 401/403 are auth failures, 404 is a missing resource, the remaining 4xx
/// are server-side rejections of the request, and 5xx surface as transfer
/// errors the caller may retry.
pub(crate) fn status(code: reqwest::StatusCode, body: String) -> ChatClientError {
    let message = if body.trim().is_empty() {
        code.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        body
    };

    match code.as_u16() {
        401 | 403 => ChatClientError::Auth(message),
        404 => ChatClientError::NotFound(message),
        400..=499 => ChatClientError::Validation(message),
        _ => ChatClientError::Transfer(format!(
            "server error ({}): {}",
            code.as_u16(),
            message
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_classes() {
        assert!(matches!(
            status(StatusCode::UNAUTHORIZED, "expired".into()),
            ChatClientError::Auth(_)
        ));
        assert!(matches!(
            status(StatusCode::FORBIDDEN, "no".into()),
            ChatClientError::Auth(_)
        ));
        assert!(matches!(
            status(StatusCode::NOT_FOUND, "gone".into()),
            ChatClientError::NotFound(_)
        ));
        assert!(matches!(
            status(StatusCode::BAD_REQUEST, "empty text".into()),
            ChatClientError::Validation(_)
        ));
        assert!(matches!(
            status(StatusCode::UNPROCESSABLE_ENTITY, "too long".into()),
            ChatClientError::Validation(_)
        ));
        assert!(matches!(
            status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            ChatClientError::Transfer(_)
        ));
        assert!(matches!(
            status(StatusCode::BAD_GATEWAY, String::new()),
            ChatClientError::Transfer(_)
        ));
    }

    #[test]
    fn test_empty_body_uses_canonical_reason() {
        match status(StatusCode::NOT_FOUND, String::new()) {
            ChatClientError::NotFound(message) => assert_eq!(message, "Not Found"),
            e => panic!("expected NotFound, got: {e:?}"),
        }
    }
}
