// crates/license-api-config/src/lib.rs
// ============================================================================
// Module: License API Config Library
// Description: Settings, endpoints, status codes, and error catalog.
// Purpose: Single source of truth for how the harness reaches the license API.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! `license-api-config` holds the static knowledge the test harness needs about
//! the remote license API: where it lives, how to authenticate, which endpoint
//! paths exist, which status codes matter, and which error descriptors the
//! server is expected to return. Settings are environment-sourced with an
//! optional TOML base layer and fail closed on invalid input.
//!
//! Security posture: API keys are secrets; they are never formatted into
//! `Debug` output or error messages.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod config;
pub mod endpoints;
pub mod env;
pub mod status;
pub mod teams;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::ErrorCode;
pub use catalog::ErrorDescriptor;
pub use config::ConfigError;
pub use config::LicenseApiConfig;
pub use endpoints::Endpoint;
pub use env::LicenseApiEnv;
pub use env::read_env_strict;
pub use teams::TeamDirectory;
pub use teams::TeamId;
