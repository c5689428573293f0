// system-tests/src/lib.rs
// ============================================================================
// Module: License API System Tests Library
// Description: Shared configuration and assertion helpers for live suites.
// Purpose: Keep suite binaries thin and their helpers unit-testable.
// Dependencies: license-api-client, license-api-config, serde, serde_jcs
// ============================================================================

//! ## Overview
//! This crate hosts configuration, soft-assertion collection, precondition
//! handling, the license pool lock, and run summaries used by the live suites
//! in `system-tests/tests`. Everything here runs offline; only the suite
//! binaries talk to the remote API.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod checks;
pub mod config;
pub mod pool;
pub mod precondition;
pub mod summary;

// ============================================================================
// SECTION: Tests
// ============================================================================
