// crates/license-api-client/src/response.rs
// ============================================================================
// Module: HTTP Response
// Description: Fully-read response snapshot and error body decoding.
// Purpose: Hand suites a response they can inspect more than once.
// Dependencies: license-api-config, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! The body is read eagerly so status, headers, and body can be asserted in
//! any order without re-reading the network stream.

use license_api_config::ErrorCode;
use license_api_config::status;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HttpError;

/// Error payload returned by the license API on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human description; may echo the rejected input.
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiErrorBody {
    /// Returns the catalog entry for the code, when it is a known one.
    #[must_use]
    pub fn known_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_wire(&self.code)
    }
}

/// Completed HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    status: u16,
    /// Response headers.
    headers: HeaderMap,
    /// Response body text.
    body: String,
    /// Requests sent to obtain this response.
    attempts: u32,
}

impl HttpResponse {
    /// Builds a response snapshot.
    #[must_use]
    pub const fn new(status: u16, headers: HeaderMap, body: String, attempts: u32) -> Self {
        Self {
            status,
            headers,
            body,
            attempts,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        status::is_success(self.status)
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value when it is valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Returns the body text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Returns true when the body is empty or whitespace.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Returns the number of requests sent to obtain this response.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Decodes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|err| HttpError::Decode(err.to_string()))
    }

    /// Decodes the body as an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] when the body is not valid JSON.
    pub fn json_value(&self) -> Result<Value, HttpError> {
        self.json()
    }

    /// Decodes the body as an API error payload, when it is one.
    #[must_use]
    pub fn error_body(&self) -> Option<ApiErrorBody> {
        serde_json::from_str(&self.body).ok()
    }
}
