// crates/license-api-client/src/http.rs
// ============================================================================
// Module: HTTP Session
// Description: Connection-reusing HTTP client with default headers and retry.
// Purpose: Send license API requests and return every response as data.
// Dependencies: license-api-config, reqwest, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! [`HttpClient`] wraps one blocking `reqwest` session. Every request carries
//! the session's default headers unless the request overrides or removes them.
//! Transient statuses and connect/timeout failures are retried per the
//! configured [`RetryPolicy`]; once the budget is spent the final response is
//! returned unchanged.
//! Invariants:
//! - Redirects are not followed.
//! - Clones share the session and the transcript; use
//!   [`HttpClient::with_fresh_transcript`] to isolate recording.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::thread;
use std::time::Duration;

use license_api_config::LicenseApiConfig;
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::header::USER_AGENT;
use reqwest::redirect::Policy;
use serde_json::Value;
use tracing::debug;
use tracing::warn;
use url::Url;

use crate::error::HttpError;
use crate::response::HttpResponse;
use crate::retry::RetryPolicy;
use crate::retry::is_retryable_transport;
use crate::retry::parse_retry_after;
use crate::transcript::Transcript;
use crate::transcript::TranscriptEntry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// API key header name.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Customer code header name.
pub const CUSTOMER_CODE_HEADER: &str = "x-customer-code";
/// JSON media type.
const APPLICATION_JSON: &str = "application/json";

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Request body variants.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON document serialized at send time.
    Json(Value),
    /// Text sent byte-for-byte, including malformed JSON.
    Raw(String),
}

/// Per-request header adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HeaderOverride {
    /// Replace or add a header.
    Set(String, String),
    /// Drop a header from the defaults.
    Remove(String),
}

/// One request against the API, relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    method: Method,
    /// Path appended to the base URL.
    path: String,
    /// Query parameters in send order.
    query: Vec<(String, String)>,
    /// Request body.
    body: RequestBody,
    /// Header adjustments applied over the session defaults.
    headers: Vec<HeaderOverride>,
}

impl ApiRequest {
    /// Creates a request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets a raw text body.
    #[must_use]
    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.body = RequestBody::Raw(body.into());
        self
    }

    /// Overrides a header for this request only.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderOverride::Set(name.into(), value.into()));
        self
    }

    /// Removes a default header for this request only.
    #[must_use]
    pub fn without_header(mut self, name: impl Into<String>) -> Self {
        self.headers.push(HeaderOverride::Remove(name.into()));
        self
    }

    /// Returns the method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters.
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the body.
    #[must_use]
    pub const fn body(&self) -> &RequestBody {
        &self.body
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Session-oriented HTTP client for the license API.
#[derive(Clone)]
pub struct HttpClient {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Underlying session.
    client: Client,
    /// Headers applied to every request.
    default_headers: HeaderMap,
    /// Retry behavior.
    retry: RetryPolicy,
    /// Recorded exchanges.
    transcript: Transcript,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> =
            self.default_headers.keys().map(HeaderName::as_str).collect();
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &header_names)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Builds a client from configuration with the configured retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when a header value is invalid or the session
    /// cannot be created.
    pub fn new(config: &LicenseApiConfig) -> Result<Self, HttpError> {
        Self::with_policy(config, RetryPolicy::from_config(config))
    }

    /// Builds a client from configuration with an explicit retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when a header value is invalid or the session
    /// cannot be created.
    pub fn with_policy(config: &LicenseApiConfig, retry: RetryPolicy) -> Result<Self, HttpError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(config.timeout)
            .build()
            .map_err(|err| HttpError::Build(err.to_string()))?;
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        default_headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        default_headers.insert(USER_AGENT, header_value(USER_AGENT.as_str(), &config.user_agent)?);
        default_headers.insert(
            HeaderName::from_static(API_KEY_HEADER),
            header_value(API_KEY_HEADER, &config.api_key)?,
        );
        default_headers.insert(
            HeaderName::from_static(CUSTOMER_CODE_HEADER),
            header_value(CUSTOMER_CODE_HEADER, &config.customer_code)?,
        );
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            default_headers,
            retry,
            transcript: Transcript::new(),
        })
    }

    /// Returns a copy whose default headers include `name: value`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidHeader`] when the name or value is invalid.
    pub fn with_header(&self, name: &str, value: &str) -> Result<Self, HttpError> {
        let mut next = self.clone();
        next.default_headers.insert(header_name(name)?, header_value(name, value)?);
        Ok(next)
    }

    /// Returns a copy without the named default header.
    #[must_use]
    pub fn without_header(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.default_headers.remove(name);
        next
    }

    /// Returns a copy with no default headers at all.
    #[must_use]
    pub fn clear_default_headers(&self) -> Self {
        let mut next = self.clone();
        next.default_headers.clear();
        next
    }

    /// Returns a copy sharing the session but recording into a new transcript.
    #[must_use]
    pub fn with_fresh_transcript(&self) -> Self {
        let mut next = self.clone();
        next.transcript = Transcript::new();
        next
    }

    /// Returns a copy with a different retry policy.
    #[must_use]
    pub fn with_retry_policy(&self, retry: RetryPolicy) -> Self {
        let mut next = self.clone();
        next.retry = retry;
        next
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the transcript handle.
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns true when the named header is among the defaults.
    #[must_use]
    pub fn has_default_header(&self, name: &str) -> bool {
        self.default_headers.contains_key(name)
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<HttpResponse, HttpError> {
        let request = query
            .iter()
            .fold(ApiRequest::get(path), |request, (key, value)| request.query(*key, *value));
        self.send(&request)
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub fn post(&self, path: &str, body: Value) -> Result<HttpResponse, HttpError> {
        self.send(&ApiRequest::post(path).json(body))
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub fn put(&self, path: &str, body: Value) -> Result<HttpResponse, HttpError> {
        self.send(&ApiRequest::put(path).json(body))
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub fn patch(&self, path: &str, body: Value) -> Result<HttpResponse, HttpError> {
        self.send(&ApiRequest::patch(path).json(body))
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub fn delete(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.send(&ApiRequest::delete(path))
    }

    /// Sends a request, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the URL, headers, or body cannot be built,
    /// when the network fails on every attempt, or when the final body cannot
    /// be read. Non-2xx statuses are not errors.
    pub fn send(&self, request: &ApiRequest) -> Result<HttpResponse, HttpError> {
        let url = self.build_url(request)?;
        let headers = self.effective_headers(request)?;
        let body = match &request.body {
            RequestBody::Empty => None,
            RequestBody::Json(value) => Some(
                serde_json::to_string(value).map_err(|err| HttpError::Serialize(err.to_string()))?,
            ),
            RequestBody::Raw(text) => Some(text.clone()),
        };

        let max_attempts = self.retry.max_attempts();
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            debug!(method = %request.method, path = %request.path, attempt, "sending request");
            let mut builder =
                self.client.request(request.method.clone(), url.clone()).headers(headers.clone());
            if let Some(body) = &body {
                builder = builder.body(body.clone());
            }

            let response = match builder.send() {
                Ok(response) => response,
                Err(err) => {
                    if attempt < max_attempts && is_retryable_transport(&err) {
                        let delay = self.retry.backoff_for(attempt);
                        warn!(
                            method = %request.method,
                            path = %request.path,
                            attempt,
                            delay_ms = millis(delay),
                            error = %err,
                            "transport failure, retrying"
                        );
                        thread::sleep(delay);
                        continue;
                    }
                    let message = err.to_string();
                    self.record(request, body.clone(), None, attempt, None, Some(message.clone()));
                    return Err(HttpError::Transport {
                        attempts: attempt,
                        message,
                    });
                }
            };

            let status = response.status().as_u16();
            let response_headers = response.headers().clone();
            let retryable = self.retry.is_retryable_status(status);
            if retryable && attempt < max_attempts {
                let delay = self.retry.delay_for(attempt, parse_retry_after(&response_headers));
                warn!(
                    method = %request.method,
                    path = %request.path,
                    attempt,
                    status,
                    delay_ms = millis(delay),
                    "transient status, retrying"
                );
                // Drain so the connection can return to the pool.
                let _ = response.text();
                thread::sleep(delay);
                continue;
            }
            if retryable {
                warn!(
                    method = %request.method,
                    path = %request.path,
                    attempts = attempt,
                    status,
                    "retry budget exhausted"
                );
            }

            let text = response.text().map_err(|err| HttpError::Body(err.to_string()))?;
            debug!(method = %request.method, path = %request.path, status, attempts = attempt, "response received");
            self.record(request, body.clone(), Some(status), attempt, Some(text.clone()), None);
            return Ok(HttpResponse::new(status, response_headers, text, attempt));
        }
    }

    /// Joins the base URL, path, and query.
    fn build_url(&self, request: &ApiRequest) -> Result<Url, HttpError> {
        let joined = if request.path.starts_with('/') {
            format!("{}{}", self.base_url, request.path)
        } else {
            format!("{}/{}", self.base_url, request.path)
        };
        let mut url = Url::parse(&joined).map_err(|err| HttpError::InvalidUrl(err.to_string()))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Applies per-request overrides to the default headers.
    fn effective_headers(&self, request: &ApiRequest) -> Result<HeaderMap, HttpError> {
        let mut headers = self.default_headers.clone();
        for adjustment in &request.headers {
            match adjustment {
                HeaderOverride::Set(name, value) => {
                    headers.insert(header_name(name)?, header_value(name, value)?);
                }
                HeaderOverride::Remove(name) => {
                    headers.remove(name.as_str());
                }
            }
        }
        if matches!(request.body, RequestBody::Json(_)) && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }
        Ok(headers)
    }

    /// Appends a transcript entry for a finished call.
    fn record(
        &self,
        request: &ApiRequest,
        request_body: Option<String>,
        status: Option<u16>,
        attempts: u32,
        response_body: Option<String>,
        error: Option<String>,
    ) {
        self.transcript.record(TranscriptEntry {
            sequence: 0,
            method: request.method.to_string(),
            path: request.path.clone(),
            query: request.query.clone(),
            status,
            attempts,
            request_body,
            response_body,
            error,
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a delay to whole milliseconds for log fields.
fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// Parses a header name.
fn header_name(name: &str) -> Result<HeaderName, HttpError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| HttpError::InvalidHeader {
        name: name.to_string(),
    })
}

/// Parses a header value; the value itself never appears in the error.
fn header_value(name: &str, value: &str) -> Result<HeaderValue, HttpError> {
    HeaderValue::from_str(value).map_err(|_| HttpError::InvalidHeader {
        name: name.to_string(),
    })
}
