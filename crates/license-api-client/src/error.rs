// crates/license-api-client/src/error.rs
// ============================================================================
// Module: Client Errors
// Description: Error types for the HTTP and license client layers.
// Purpose: Separate transport failures from local precondition failures.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`HttpError`] covers everything that prevents a response from being
//! produced. [`LicenseClientError`] adds the domain-level failures raised by
//! payload validation and setup helpers.

use thiserror::Error;

/// Errors raised by [`crate::HttpClient`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// The underlying HTTP session could not be created.
    #[error("http client build failed: {0}")]
    Build(String),
    /// The request URL could not be formed.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    /// A header name or value is not valid HTTP.
    #[error("invalid header {name}")]
    InvalidHeader {
        /// Header name that failed validation.
        name: String,
    },
    /// A JSON request body could not be serialized.
    #[error("request serialization failed: {0}")]
    Serialize(String),
    /// The request failed at the network level after all attempts.
    #[error("http request failed after {attempts} attempt(s): {message}")]
    Transport {
        /// Number of attempts made, including the first.
        attempts: u32,
        /// Final transport error message.
        message: String,
    },
    /// The response body could not be read.
    #[error("response body read failed: {0}")]
    Body(String),
    /// The response body did not decode as the requested type.
    #[error("response decode failed: {0}")]
    Decode(String),
}

/// Errors raised by [`crate::LicenseClient`].
#[derive(Debug, Error)]
pub enum LicenseClientError {
    /// Required request fields were omitted; no request was sent.
    #[error("invalid request: {0}")]
    Validation(String),
    /// A helper query found no license in the requested state.
    #[error("no matching licenses: {0}")]
    EmptyResult(String),
    /// The server answered a helper query with an unusable response.
    #[error("upstream failure: {0}")]
    Upstream(String),
    /// The HTTP layer failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}
