//! JSON error bodies returned by the API and the catch-all status error

use serde::{Deserialize, Serialize};
use std::fmt;

/// `{"error": {"id": "...", "message": "..."}}`, sent with 404 responses.
///
/// Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundError {
    #[serde(default)]
    pub error: NotFoundErrorDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundErrorDetail {
    /// Identifier of the object that was not found
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub message: String,
}

/// `{"error": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericError {
    #[serde(default)]
    pub error: String,
}

/// Human-readable error for any response with status >= 400.
///
/// `body` holds the raw response text whenever the body is a JSON value; it
/// is `None` for empty bodies, `null` and malformed JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    status: u16,
    body: Option<String>,
}

impl StatusError {
    pub fn new(status: u16, body: Option<String>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "got the {} status code from the server", self.status)?;
        if let Some(body) = &self.body {
            write!(f, ": {}", body)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_without_body() {
        let err = StatusError::new(502, None);
        assert_eq!(err.to_string(), "got the 502 status code from the server");
    }

    #[test]
    fn status_error_with_body() {
        let err = StatusError::new(400, Some(r#"{"error":"bad"}"#.to_string()));
        assert_eq!(
            err.to_string(),
            r#"got the 400 status code from the server: {"error":"bad"}"#
        );
    }

    #[test]
    fn not_found_shape_requires_nested_object() {
        assert!(serde_json::from_str::<NotFoundError>(r#"{"error":"plain"}"#).is_err());
        let parsed: NotFoundError =
            serde_json::from_str(r#"{"error":{"id":"X","message":"M"}}"#).unwrap();
        assert_eq!(parsed.error.id, "X");
        assert_eq!(parsed.error.message, "M");
    }

    #[test]
    fn partial_bodies_fill_in_empty_fields() {
        let parsed: NotFoundError =
            serde_json::from_str(r#"{"error":{"message":"Registry not found"}}"#).unwrap();
        assert_eq!(parsed.error.id, "");
        assert_eq!(parsed.error.message, "Registry not found");

        let generic: GenericError = serde_json::from_str(r#"{"message":"bad"}"#).unwrap();
        assert_eq!(generic, GenericError::default());
    }
}
