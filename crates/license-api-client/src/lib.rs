// crates/license-api-client/src/lib.rs
// ============================================================================
// Module: License API Client Library
// Description: HTTP session wrapper and license domain client.
// Purpose: Give test suites one typed entry point to the remote license API.
// Dependencies: license-api-config, reqwest, serde, tracing, url
// ============================================================================

//! ## Overview
//! Two layers:
//! - [`HttpClient`] owns one connection-reusing session, applies default
//!   headers, and retries transient failures according to a [`RetryPolicy`].
//! - [`LicenseClient`] knows the license endpoints, builds their payloads, and
//!   derives helper queries used by test setup.
//!
//! Every non-2xx response is returned as data. Only transport failures that
//! outlive the retry budget and local authoring mistakes become errors.
//! Invariants:
//! - At most one request is in flight per call; retries are sequential.
//! - Header values are never written to logs or transcripts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod http;
pub mod license;
pub mod payload;
pub mod response;
pub mod retry;
pub mod transcript;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::HttpError;
pub use reqwest::header::HeaderMap;
pub use error::LicenseClientError;
pub use http::ApiRequest;
pub use http::HttpClient;
pub use http::RequestBody;
pub use license::LicenseClient;
pub use payload::AssignLicenseRequest;
pub use payload::ChangeTeamRequest;
pub use payload::ChangeTeamResponse;
pub use payload::Contact;
pub use payload::LicenseSummary;
pub use response::ApiErrorBody;
pub use response::HttpResponse;
pub use retry::RetryPolicy;
pub use transcript::Transcript;
pub use transcript::TranscriptEntry;
