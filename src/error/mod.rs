use thiserror::Error;

pub(crate) type NoteResult<T> = Result<T, NoteError>;

/// Everything that can go wrong between a user action and the NoteHub API.
///
/// Errors are scoped to the action that triggered them; none of them is fatal
/// to the app, so the type is `Clone` and can live inside signals and the
/// query cache.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NoteError {
    /// The request never produced a response (offline, CORS, DNS...).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the body's `message` field when present.
    #[error("{}", server_message(*status, message.as_deref()))]
    Server { status: u16, message: Option<String> },

    /// 2xx response whose body does not match the contract.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Rejected on the client before any request was issued.
    #[error("{0}")]
    Validation(String),
}

fn server_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => format!("Request failed with status code {status}"),
    }
}

impl NoteError {
    pub(crate) fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    pub(crate) fn decode(e: impl std::fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }

    /// Build a server error from a status code and the raw response body.
    ///
    /// The body is expected to be `{ "message": "..." }`, anything else falls
    /// back to the generic status message.
    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .map(|s| s.to_string())
            });
        Self::Server { status, message }
    }

    /// Text shown to the user. Never empty.
    pub(crate) fn user_message(&self) -> String {
        let s = self.to_string();
        if s.trim().is_empty() {
            "Something went wrong".to_string()
        } else {
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_uses_body_message() {
        let e = NoteError::from_response_body(400, r#"{"message":"title is required"}"#);
        assert_eq!(
            e,
            NoteError::Server {
                status: 400,
                message: Some("title is required".to_string())
            }
        );
        assert_eq!(e.user_message(), "title is required");
    }

    #[test]
    fn test_server_error_falls_back_to_status() {
        let e = NoteError::from_response_body(502, "<html>Bad Gateway</html>");
        assert_eq!(e.user_message(), "Request failed with status code 502");

        let blank = NoteError::from_response_body(500, r#"{"message":"  "}"#);
        assert_eq!(blank.user_message(), "Request failed with status code 500");
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let e = NoteError::Validation("Title is required".to_string());
        assert_eq!(e.user_message(), "Title is required");
    }

    #[test]
    fn test_empty_validation_message_gets_fallback() {
        let e = NoteError::Validation(String::new());
        assert_eq!(e.user_message(), "Something went wrong");
    }
}
