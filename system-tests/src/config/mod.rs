// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Harness-level settings for live suites.
// Purpose: Provide typed access to run-root, logging, and seed overrides.
// Dependencies: license-api-config
// ============================================================================

//! ## Overview
//! API credentials live in `license-api-config`. This module only covers
//! knobs that shape how suites run and where they write artifacts.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
