// crates/license-api-config/src/status.rs
// ============================================================================
// Module: HTTP Status Codes
// Description: Status code constants referenced by suites and retry policy.
// Purpose: Name the codes the license API documents.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Plain `u16` constants keep assertions readable without pulling an HTTP
//! crate into the configuration layer.

// ============================================================================
// SECTION: Success
// ============================================================================

/// 200 OK.
pub const OK: u16 = 200;
/// 201 Created.
pub const CREATED: u16 = 201;
/// 202 Accepted.
pub const ACCEPTED: u16 = 202;
/// 204 No Content.
pub const NO_CONTENT: u16 = 204;

// ============================================================================
// SECTION: Client Errors
// ============================================================================

/// 400 Bad Request.
pub const BAD_REQUEST: u16 = 400;
/// 401 Unauthorized.
pub const UNAUTHORIZED: u16 = 401;
/// 403 Forbidden.
pub const FORBIDDEN: u16 = 403;
/// 404 Not Found.
pub const NOT_FOUND: u16 = 404;
/// 405 Method Not Allowed.
pub const METHOD_NOT_ALLOWED: u16 = 405;
/// 429 Too Many Requests.
pub const TOO_MANY_REQUESTS: u16 = 429;

// ============================================================================
// SECTION: Server Errors
// ============================================================================

/// 500 Internal Server Error.
pub const INTERNAL_SERVER_ERROR: u16 = 500;
/// 502 Bad Gateway.
pub const BAD_GATEWAY: u16 = 502;
/// 503 Service Unavailable.
pub const SERVICE_UNAVAILABLE: u16 = 503;
/// 504 Gateway Timeout.
pub const GATEWAY_TIMEOUT: u16 = 504;

/// Statuses treated as transient and retried by the HTTP client.
pub const TRANSIENT_STATUSES: [u16; 5] =
    [TOO_MANY_REQUESTS, INTERNAL_SERVER_ERROR, BAD_GATEWAY, SERVICE_UNAVAILABLE, GATEWAY_TIMEOUT];

/// Returns true for 2xx statuses.
#[must_use]
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}
