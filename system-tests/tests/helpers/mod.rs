// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared fixtures, reporting, and logging for live suites.
// Purpose: Give every suite the same setup, skip, and artifact behavior.
// Dependencies: system-tests, license-api-client, license-test-data
// ============================================================================

//! ## Overview
//! Shared helpers for the license API system-tests.
//! Invariants:
//! - Each test owns a fresh transcript; the HTTP session is shared.
//! - Every test writes a summary, including skipped and panicking ones.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod fixtures;
