// crates/license-api-config/src/env.rs
// ============================================================================
// Module: License API Environment
// Description: Environment keys and strict parsing helpers.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys recognized by the license API configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseApiEnv {
    /// Global API key sent as `X-Api-Key` (required).
    ApiKey,
    /// Customer code sent as `X-Customer-Code` (required).
    CustomerCode,
    /// Optional base URL override.
    BaseUrl,
    /// Optional request timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Optional maximum retry count for transient failures.
    MaxRetries,
    /// Optional retry backoff base in milliseconds.
    RetryBackoffMillis,
    /// Optional named team table (`Team 1=2573297,Team 2=2717496`).
    TeamIds,
    /// Optional team-scoped API keys (`2573297=key,2717496=key`).
    TeamApiKeys,
    /// Optional path to a TOML base configuration file.
    ConfigPath,
}

impl LicenseApiEnv {
    /// All recognized keys, in documentation order.
    pub const ALL: [Self; 9] = [
        Self::ApiKey,
        Self::CustomerCode,
        Self::BaseUrl,
        Self::TimeoutSeconds,
        Self::MaxRetries,
        Self::RetryBackoffMillis,
        Self::TeamIds,
        Self::TeamApiKeys,
        Self::ConfigPath,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "JETBRAINS_API_KEY",
            Self::CustomerCode => "JETBRAINS_CUSTOMER_CODE",
            Self::BaseUrl => "JETBRAINS_API_BASE_URL",
            Self::TimeoutSeconds => "JETBRAINS_API_TIMEOUT_SEC",
            Self::MaxRetries => "JETBRAINS_API_MAX_RETRIES",
            Self::RetryBackoffMillis => "JETBRAINS_API_RETRY_BACKOFF_MS",
            Self::TeamIds => "JETBRAINS_TEAM_IDS",
            Self::TeamApiKeys => "JETBRAINS_TEAM_API_KEYS",
            Self::ConfigPath => "JETBRAINS_API_CONFIG",
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Rejects values that are set but empty or whitespace.
///
/// # Errors
///
/// Returns an error when the value is present but blank.
pub(crate) fn nonempty(name: &str, value: Option<String>) -> Result<Option<String>, String> {
    match value {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses a positive number of seconds.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
pub(crate) fn parse_positive_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a non-negative integer.
///
/// # Errors
///
/// Returns an error when the value is not an unsigned integer.
pub(crate) fn parse_u32(name: &str, raw: &str) -> Result<u32, String> {
    raw.trim().parse().map_err(|_| format!("{name} must be a non-negative integer"))
}

/// Parses a millisecond duration.
///
/// # Errors
///
/// Returns an error when the value is not an unsigned integer.
pub(crate) fn parse_millis(name: &str, raw: &str) -> Result<Duration, String> {
    let millis: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a non-negative integer number of milliseconds"))?;
    Ok(Duration::from_millis(millis))
}

/// Splits a `key=value,key=value` list into trimmed pairs.
///
/// # Errors
///
/// Returns an error when an entry lacks `=` or has an empty side.
pub(crate) fn parse_pairs(name: &str, raw: &str) -> Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let Some((key, value)) = entry.split_once('=') else {
            return Err(format!("{name} entries must use key=value form"));
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return Err(format!("{name} entries must have non-empty keys and values"));
        }
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(pairs)
}
