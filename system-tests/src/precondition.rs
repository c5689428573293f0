// system-tests/src/precondition.rs
// ============================================================================
// Module: Preconditions
// Description: Explicit met/unmet outcome for live-data setup steps.
// Purpose: Turn missing remote state into a recorded skip, not a failure.
// Dependencies: license-api-client
// ============================================================================

//! ## Overview
//! Live suites depend on shared remote state (free licenses, team contents)
//! that other runs can consume. Setup helpers return [`Precondition`], and the
//! [`require!`](crate::require) macro unwraps it or records a skip and returns
//! early from the test.

use license_api_client::LicenseClientError;

/// Outcome of a setup step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition<T> {
    /// The state exists; carries the value the test needs.
    Met(T),
    /// The state is missing; carries the skip reason.
    Unmet(String),
}

impl<T> Precondition<T> {
    /// Returns true for [`Precondition::Met`].
    #[must_use]
    pub const fn is_met(&self) -> bool {
        matches!(self, Self::Met(_))
    }

    /// Maps the carried value.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Precondition<U> {
        match self {
            Self::Met(value) => Precondition::Met(f(value)),
            Self::Unmet(reason) => Precondition::Unmet(reason),
        }
    }

    /// Unmet unless `condition` holds for the carried value.
    #[must_use]
    pub fn filter(self, condition: impl FnOnce(&T) -> bool, reason: impl FnOnce() -> String) -> Self {
        match self {
            Self::Met(value) if condition(&value) => Self::Met(value),
            Self::Met(_) => Self::Unmet(reason()),
            Self::Unmet(reason) => Self::Unmet(reason),
        }
    }
}

/// Classifies a helper-query result.
///
/// An empty result is an unmet precondition; every other error is a real
/// failure.
///
/// # Errors
///
/// Returns the original error unless it is [`LicenseClientError::EmptyResult`].
pub fn classify<T>(result: Result<T, LicenseClientError>) -> Result<Precondition<T>, LicenseClientError> {
    match result {
        Ok(value) => Ok(Precondition::Met(value)),
        Err(LicenseClientError::EmptyResult(reason)) => Ok(Precondition::Unmet(reason)),
        Err(err) => Err(err),
    }
}

/// Unwraps a [`Precondition`] or records a skip and returns `Ok(())`.
///
/// The first argument must expose `skip(&str) -> Result<(), E>` where `E`
/// converts into the test's error type.
#[macro_export]
macro_rules! require {
    ($reporter:expr, $precondition:expr) => {
        match $precondition {
            $crate::precondition::Precondition::Met(value) => value,
            $crate::precondition::Precondition::Unmet(reason) => {
                $reporter.skip(&reason)?;
                return Ok(());
            }
        }
    };
}
