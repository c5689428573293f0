// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed settings for live suites.
// Purpose: Centralize parsing of run-root, log filter, and seed overrides.
// Dependencies: license-api-config
// ============================================================================

//! ## Overview
//! Values are read with strict UTF-8 enforcement. Set-but-empty values fail
//! closed rather than silently falling back to defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use license_api_config::read_env_strict;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional artifact root override.
    RunRoot,
    /// Optional `tracing` filter directive for suite logs.
    LogFilter,
    /// Optional seed for the test data generator.
    Seed,
}

impl SystemTestEnv {
    /// Every key.
    pub const ALL: [Self; 3] = [Self::RunRoot, Self::LogFilter, Self::Seed];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "LICENSE_SYSTEM_TEST_RUN_ROOT",
            Self::LogFilter => "LICENSE_SYSTEM_TEST_LOG",
            Self::Seed => "LICENSE_SYSTEM_TEST_SEED",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional artifact root override.
    pub run_root: Option<PathBuf>,
    /// Optional log filter directive.
    pub log_filter: Option<String>,
    /// Optional generator seed.
    pub seed: Option<u64>,
}

impl SystemTestConfig {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is not valid UTF-8, is empty, or fails
    /// validation.
    pub fn load() -> Result<Self, String> {
        Self::load_from(read_env_strict)
    }

    /// Loads settings through an injected lookup.
    ///
    /// # Errors
    ///
    /// Same as [`SystemTestConfig::load`].
    pub fn load_from<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Result<Option<String>, String>,
    {
        let read = |key: SystemTestEnv| -> Result<Option<String>, String> {
            match lookup(key.as_str())? {
                Some(value) if value.trim().is_empty() => {
                    Err(format!("{} must not be empty", key.as_str()))
                }
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };
        let run_root = read(SystemTestEnv::RunRoot)?.map(PathBuf::from);
        let log_filter = read(SystemTestEnv::LogFilter)?;
        let seed = read(SystemTestEnv::Seed)?
            .map(|raw| {
                raw.parse::<u64>().map_err(|_| {
                    format!("{} must be an unsigned integer", SystemTestEnv::Seed.as_str())
                })
            })
            .transpose()?;
        Ok(Self {
            run_root,
            log_filter,
            seed,
        })
    }
}
