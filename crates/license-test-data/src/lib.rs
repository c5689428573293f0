// crates/license-test-data/src/lib.rs
// ============================================================================
// Module: License Test Data Library
// Description: Generators and fixed catalogs of license API test inputs.
// Purpose: Supply unique valid contacts and known-bad inputs to suites.
// Dependencies: license-api-client, license-api-config, rand
// ============================================================================

//! ## Overview
//! [`TestDataGenerator`] produces fresh contacts and random invalid
//! identifiers. The [`catalog`] module holds the fixed lists of malformed
//! emails and JSON documents that suites iterate over.
//! Invariants:
//! - Catalog contents and order are stable across runs.
//! - A seeded generator reproduces names and catalog picks; email suffixes
//!   always come from entropy so repeated runs do not collide server-side.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod generator;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::BoundaryData;
pub use catalog::ContactField;
pub use generator::DEFAULT_SEED;
pub use generator::GeneratorError;
pub use generator::TestDataGenerator;
