// crates/license-api-client/src/retry.rs
// ============================================================================
// Module: Retry Policy
// Description: Retryable status set and exponential backoff schedule.
// Purpose: Keep transient-failure handling orthogonal to request building.
// Dependencies: license-api-config, reqwest
// ============================================================================

//! ## Overview
//! A [`RetryPolicy`] decides which responses are transient and how long to
//! wait before the next attempt. Delays double from a base value and are
//! capped; a numeric `Retry-After` header on a retryable response replaces
//! the computed delay, still subject to the cap.
//! Invariants:
//! - `max_retries` counts retries, not attempts: a policy with three retries
//!   sends at most four requests.
//! - Statuses outside the retryable set are never retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::time::Duration;

use license_api_config::LicenseApiConfig;
use license_api_config::status::TRANSIENT_STATUSES;
use reqwest::header::HeaderMap;
use reqwest::header::RETRY_AFTER;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default upper bound on a single backoff delay.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(120);

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Retry configuration injected into [`crate::HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Statuses treated as transient.
    retryable_statuses: BTreeSet<u16>,
    /// Retries allowed after the first attempt.
    max_retries: u32,
    /// Delay before the first retry; doubled for each following retry.
    backoff_base: Duration,
    /// Cap on any single delay.
    max_backoff: Duration,
    /// Whether `Retry-After` overrides the computed delay.
    respect_retry_after: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retryable_statuses: TRANSIENT_STATUSES.into_iter().collect(),
            max_retries: license_api_config::config::DEFAULT_MAX_RETRIES,
            backoff_base: license_api_config::config::DEFAULT_RETRY_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            respect_retry_after: true,
        }
    }
}

impl RetryPolicy {
    /// Builds the policy described by the harness configuration.
    #[must_use]
    pub fn from_config(config: &LicenseApiConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_base: config.retry_backoff,
            ..Self::default()
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Sets the retry budget.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff base.
    #[must_use]
    pub const fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    /// Sets the cap on a single delay.
    #[must_use]
    pub const fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    /// Replaces the retryable status set.
    #[must_use]
    pub fn with_retryable_statuses<I>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = u16>,
    {
        self.retryable_statuses = statuses.into_iter().collect();
        self
    }

    /// Ignores `Retry-After` and always uses the computed backoff.
    #[must_use]
    pub const fn ignore_retry_after(mut self) -> Self {
        self.respect_retry_after = false;
        self
    }

    /// Returns the retry budget.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the maximum number of requests a single call may send.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Returns true when the status is treated as transient.
    #[must_use]
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Returns the retryable statuses in ascending order.
    pub fn retryable_statuses(&self) -> impl Iterator<Item = u16> + '_ {
        self.retryable_statuses.iter().copied()
    }

    /// Computed delay before retry number `retry` (1-based).
    #[must_use]
    pub fn backoff_for(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let exponent = retry.saturating_sub(1);
        let factor = 2u32.checked_pow(exponent);
        factor
            .and_then(|factor| self.backoff_base.checked_mul(factor))
            .map_or(self.max_backoff, |delay| delay.min(self.max_backoff))
    }

    /// Delay before retry number `retry`, honoring a server hint.
    #[must_use]
    pub fn delay_for(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(hint) if self.respect_retry_after => hint.min(self.max_backoff),
            _ => self.backoff_for(retry),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a `Retry-After` header given in whole seconds.
///
/// HTTP-date values are ignored and fall back to the computed backoff.
#[must_use]
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?;
    raw.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Returns true when a transport failure is worth another attempt.
#[must_use]
pub fn is_retryable_transport(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}
