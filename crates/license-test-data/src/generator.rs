// crates/license-test-data/src/generator.rs
// ============================================================================
// Module: Test Data Generator
// Description: Random contacts, identifiers, and catalog picks.
// Purpose: Give each test case fresh inputs without hand-written fixtures.
// Dependencies: license-api-client, license-api-config, rand, thiserror
// ============================================================================

//! ## Overview
//! A generator owns a seedable RNG for names, identifiers, and catalog picks.
//! Email suffixes are drawn from a separate entropy-seeded RNG so addresses
//! stay unique across runs even when the main RNG is seeded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use license_api_client::Contact;
use license_api_config::TeamDirectory;
use license_api_config::TeamId;
use license_api_config::config::DEFAULT_TEST_EMAIL_DOMAIN;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::catalog::BoundaryData;
use crate::catalog::FIRST_NAMES;
use crate::catalog::INVALID_EMAILS;
use crate::catalog::INVALID_JSON;
use crate::catalog::LAST_NAMES;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Seed used by deterministic fixtures.
pub const DEFAULT_SEED: u64 = 42;
/// Prefix used when an email has no explicit prefix.
const DEFAULT_EMAIL_PREFIX: &str = "test";
/// Lowercase hex digits appended to email local parts.
const EMAIL_SUFFIX_LEN: usize = 8;
/// Length of generated invalid license IDs.
const INVALID_LICENSE_ID_LEN: usize = 10;
/// Alphabet of generated invalid license IDs.
const LICENSE_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Largest generated invalid team ID.
const MAX_INVALID_TEAM_ID: u64 = 9_999_999;
/// Draws allowed before giving up on an unknown team ID.
const MAX_TEAM_ID_ATTEMPTS: usize = 100;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by [`TestDataGenerator`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// No acceptable value was drawn within the attempt budget.
    #[error("no value found after {attempts} attempts: {what}")]
    Exhausted {
        /// What was being generated.
        what: &'static str,
        /// Attempts made.
        attempts: usize,
    },
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Source of test inputs.
#[derive(Debug, Clone)]
pub struct TestDataGenerator {
    /// RNG for names, identifiers, and catalog picks.
    rng: StdRng,
    /// RNG for email uniqueness; never seeded.
    unique: StdRng,
    /// Domain appended to generated emails, including `@`.
    email_domain: String,
}

impl Default for TestDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDataGenerator {
    /// Creates an entropy-seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates a generator whose names and picks are reproducible.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Wraps an RNG.
    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            unique: StdRng::from_entropy(),
            email_domain: DEFAULT_TEST_EMAIL_DOMAIN.to_string(),
        }
    }

    /// Sets the email domain, which should start with `@`.
    #[must_use]
    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = domain.into();
        self
    }

    /// Returns the email domain.
    #[must_use]
    pub fn email_domain(&self) -> &str {
        &self.email_domain
    }

    /// Generates `<prefix>_<8 hex><domain>`, defaulting the prefix to `test`.
    pub fn email(&mut self, prefix: Option<&str>) -> String {
        let prefix = prefix.unwrap_or(DEFAULT_EMAIL_PREFIX);
        let suffix: String = (0..EMAIL_SUFFIX_LEN)
            .filter_map(|_| char::from_digit(self.unique.gen_range(0..16), 16))
            .collect();
        format!("{prefix}_{suffix}{}", self.email_domain)
    }

    /// Generates a contact with a fresh email and pooled names.
    pub fn contact(&mut self) -> Contact {
        let email = self.email(None);
        let first_name = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Test");
        let last_name = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("User");
        Contact::new(email, first_name, last_name)
    }

    /// Returns the malformed email catalog.
    #[must_use]
    pub fn invalid_emails(&self) -> Vec<String> {
        INVALID_EMAILS.iter().map(|email| (*email).to_string()).collect()
    }

    /// Returns the fixed boundary name cases.
    #[must_use]
    pub fn boundary_data(&self) -> BoundaryData {
        BoundaryData::standard()
    }

    /// Generates a 10-character `[A-Z0-9]` license ID.
    pub fn invalid_license_id(&mut self) -> String {
        (0..INVALID_LICENSE_ID_LEN)
            .filter_map(|_| LICENSE_ID_ALPHABET.choose(&mut self.rng).map(|byte| char::from(*byte)))
            .collect()
    }

    /// Draws a team ID in `1..=9_999_999` that is not in `known`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Exhausted`] after 100 draws that all hit
    /// known IDs.
    pub fn invalid_team_id(&mut self, known: &BTreeSet<TeamId>) -> Result<TeamId, GeneratorError> {
        self.invalid_team_id_in(known, 1..=MAX_INVALID_TEAM_ID)
    }

    /// Draws a team ID from `range` that is not in `known`.
    pub(crate) fn invalid_team_id_in(
        &mut self,
        known: &BTreeSet<TeamId>,
        range: RangeInclusive<u64>,
    ) -> Result<TeamId, GeneratorError> {
        for _ in 0..MAX_TEAM_ID_ATTEMPTS {
            let candidate = TeamId::new(self.rng.gen_range(range.clone()));
            if !known.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(GeneratorError::Exhausted {
            what: "unknown team id",
            attempts: MAX_TEAM_ID_ATTEMPTS,
        })
    }

    /// Picks one malformed JSON document.
    pub fn invalid_json(&mut self) -> &'static str {
        INVALID_JSON.choose(&mut self.rng).copied().unwrap_or(INVALID_JSON[0])
    }

    /// Returns every malformed JSON document.
    #[must_use]
    pub fn invalid_json_catalog(&self) -> &'static [&'static str] {
        &INVALID_JSON
    }

    /// Picks a known logical team name.
    pub fn team_name(&mut self, directory: &TeamDirectory) -> Option<String> {
        let names: Vec<&str> = directory.names().collect();
        names.choose(&mut self.rng).map(|name| (*name).to_string())
    }

    /// Picks `count` distinct entries in random order, or `None` when there
    /// are fewer than `count`.
    pub fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Option<Vec<T>> {
        if items.len() < count {
            return None;
        }
        Some(items.choose_multiple(&mut self.rng, count).cloned().collect())
    }
}
