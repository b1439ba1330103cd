//! Normalized result of one API call

use crate::error::{CraasError, GenericError, NotFoundError, Result, StatusError};
use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// What the status code and error body of a response turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Status below 400
    Success,
    NotFound(NotFoundError),
    Generic(GenericError),
    /// Status >= 400 with an empty or unrecognised body
    OpaqueStatus(StatusCode),
}

/// Response of one API call.
///
/// On success the body is left unread and can be taken exactly once with
/// [`Outcome::extract_into`] or [`Outcome::extract_raw`]. For error statuses
/// the body has already been read to build the classification.
#[derive(Debug)]
pub struct Outcome {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Response>,
    classification: Classification,
    err: Option<StatusError>,
}

impl Outcome {
    pub(crate) fn success(response: Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            body: Some(response),
            classification: Classification::Success,
            err: None,
        }
    }

    /// Read the error body and classify it.
    ///
    /// The response is consumed here; only a failure to read the body is
    /// returned as an error.
    pub(crate) async fn from_error_response(response: Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(CraasError::BodyRead)?;

        let (classification, err) = classify(status, &body);
        Ok(Self {
            status,
            headers,
            body: None,
            classification,
            err: Some(err),
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn is_error(&self) -> bool {
        self.err.is_some()
    }

    /// Catch-all error, set for every status >= 400
    pub fn err(&self) -> Option<&StatusError> {
        self.err.as_ref()
    }

    pub fn not_found(&self) -> Option<&NotFoundError> {
        match &self.classification {
            Classification::NotFound(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn generic(&self) -> Option<&GenericError> {
        match &self.classification {
            Classification::Generic(payload) => Some(payload),
            _ => None,
        }
    }

    /// Whether the body is still available for extraction
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Turn an error outcome into [`CraasError::Api`]
    pub fn into_result(self) -> Result<Self> {
        if self.is_error() {
            Err(CraasError::Api(Box::new(self)))
        } else {
            Ok(self)
        }
    }

    /// Decode the JSON body into `T`
    pub async fn extract_into<T: DeserializeOwned>(&mut self) -> Result<T> {
        let body = self.extract_raw().await?;
        serde_json::from_slice(&body).map_err(CraasError::Extract)
    }

    /// Read the body without decoding it
    pub async fn extract_raw(&mut self) -> Result<Vec<u8>> {
        let response = self.body.take().ok_or(CraasError::BodyConsumed)?;
        let bytes = response.bytes().await.map_err(CraasError::BodyRead)?;
        Ok(bytes.to_vec())
    }
}

/// Classify an error response from its status and raw body.
///
/// Structured payloads are parsed best-effort. Any JSON value other than
/// `null` keeps the raw body in the message, even when it matches neither
/// known shape; empty bodies and malformed JSON yield the status code only.
pub fn classify(status: StatusCode, body: &[u8]) -> (Classification, StatusError) {
    let code = status.as_u16();
    if body.is_empty() {
        return (Classification::OpaqueStatus(status), StatusError::new(code, None));
    }

    let value = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(status = code, error = %err, "error body is not valid JSON");
            None
        }
    };
    let Some(value) = value else {
        return (Classification::OpaqueStatus(status), StatusError::new(code, None));
    };

    let classification = if status == StatusCode::NOT_FOUND {
        NotFoundError::deserialize(&value)
            .map(Classification::NotFound)
            .or_else(|_| GenericError::deserialize(&value).map(Classification::Generic))
    } else {
        GenericError::deserialize(&value).map(Classification::Generic)
    };
    let classification = classification.unwrap_or_else(|err| {
        tracing::debug!(status = code, error = %err, "error body has no known shape");
        Classification::OpaqueStatus(status)
    });

    let text = String::from_utf8_lossy(body).into_owned();
    (classification, StatusError::new(code, Some(text)))
}
