// crates/license-api-config/src/config.rs
// ============================================================================
// Module: License API Configuration
// Description: Typed settings for reaching the remote license API.
// Purpose: Load, layer, and validate settings with fail-closed semantics.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Settings come from three layers, lowest first: built-in defaults, an
//! optional TOML file named by `JETBRAINS_API_CONFIG`, and individual
//! environment variables. The API key and customer code have no defaults and
//! must be supplied by one of the upper layers.
//! Security posture: API keys are secrets; `Debug` output redacts them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::endpoints::Endpoint;
use crate::env::LicenseApiEnv;
use crate::env::nonempty;
use crate::env::parse_millis;
use crate::env::parse_pairs;
use crate::env::parse_positive_seconds;
use crate::env::parse_u32;
use crate::env::read_env_strict;
use crate::teams::TeamDirectory;
use crate::teams::TeamId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Production base URL of the license API.
pub const DEFAULT_BASE_URL: &str = "https://account.jetbrains.com/api/v1";
/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "JetBrains-API-Automation-Tests/1.0";
/// Domain appended to generated test emails.
pub const DEFAULT_TEST_EMAIL_DOMAIN: &str = "@jetbrains-test.com";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default retry count for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default exponential backoff base.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);
/// Upper bound on configured retries.
const MAX_RETRIES_LIMIT: u32 = 10;
/// Maximum accepted size of the TOML base layer.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment value could not be read or parsed.
    #[error("config env error: {0}")]
    Env(String),
    /// The TOML base layer could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// The TOML base layer could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The merged configuration is inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Settings for the license API client and test harness.
///
/// # Invariants
/// - `api_key` and `customer_code` are non-empty.
/// - `timeout` is greater than zero and `max_retries` is bounded.
/// - Every key in `team_api_keys` names a team in `teams`.
#[derive(Clone, PartialEq, Eq)]
pub struct LicenseApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Global API key sent as `X-Api-Key`.
    pub api_key: String,
    /// Customer code sent as `X-Customer-Code`.
    pub customer_code: String,
    /// Optional API keys scoped to individual teams.
    pub team_api_keys: BTreeMap<TeamId, String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries allowed for transient failures.
    pub max_retries: u32,
    /// Exponential backoff base between retries.
    pub retry_backoff: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Domain suffix (including `@`) for generated emails.
    pub test_email_domain: String,
    /// Named team lookup table.
    pub teams: TeamDirectory,
}

impl fmt::Debug for LicenseApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("customer_code", &self.customer_code)
            .field("team_api_keys", &self.team_api_keys.keys().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("user_agent", &self.user_agent)
            .field("test_email_domain", &self.test_email_domain)
            .field("teams", &self.teams)
            .finish()
    }
}

/// Partial settings parsed from the TOML base layer.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    /// Base URL override.
    base_url: Option<String>,
    /// Global API key.
    api_key: Option<String>,
    /// Customer code.
    customer_code: Option<String>,
    /// Timeout in seconds.
    timeout_secs: Option<u64>,
    /// Retry count.
    max_retries: Option<u32>,
    /// Backoff base in milliseconds.
    retry_backoff_ms: Option<u64>,
    /// User agent override.
    user_agent: Option<String>,
    /// Test email domain override.
    test_email_domain: Option<String>,
    /// Named team table.
    #[serde(default)]
    teams: BTreeMap<String, u64>,
    /// Team-scoped API keys keyed by team ID.
    #[serde(default)]
    team_api_keys: BTreeMap<String, String>,
}

impl LicenseApiConfig {
    /// Builds a configuration with defaults for everything but credentials.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        customer_code: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            customer_code: customer_code.into(),
            team_api_keys: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            test_email_domain: DEFAULT_TEST_EMAIL_DOMAIN.to_string(),
            teams: TeamDirectory::default(),
        }
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is invalid, required credentials
    /// are missing, or the TOML base layer cannot be read.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(read_env_strict)
    }

    /// Loads configuration using a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is invalid, required credentials
    /// are missing, or the TOML base layer cannot be read.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, String>,
    {
        let read = |key: LicenseApiEnv| -> Result<Option<String>, ConfigError> {
            let raw = lookup(key.as_str()).map_err(ConfigError::Env)?;
            nonempty(key.as_str(), raw).map_err(ConfigError::Env)
        };

        let file = match read(LicenseApiEnv::ConfigPath)? {
            Some(path) => read_file_layer(Path::new(&path))?,
            None => FileConfig::default(),
        };
        let mut config = Self::from_file_layer(file)?;

        if let Some(value) = read(LicenseApiEnv::BaseUrl)? {
            config.base_url = value;
        }
        if let Some(value) = read(LicenseApiEnv::ApiKey)? {
            config.api_key = value;
        }
        if let Some(value) = read(LicenseApiEnv::CustomerCode)? {
            config.customer_code = value;
        }
        if let Some(value) = read(LicenseApiEnv::TimeoutSeconds)? {
            config.timeout = parse_positive_seconds(LicenseApiEnv::TimeoutSeconds.as_str(), &value)
                .map_err(ConfigError::Env)?;
        }
        if let Some(value) = read(LicenseApiEnv::MaxRetries)? {
            config.max_retries =
                parse_u32(LicenseApiEnv::MaxRetries.as_str(), &value).map_err(ConfigError::Env)?;
        }
        if let Some(value) = read(LicenseApiEnv::RetryBackoffMillis)? {
            config.retry_backoff = parse_millis(LicenseApiEnv::RetryBackoffMillis.as_str(), &value)
                .map_err(ConfigError::Env)?;
        }
        if let Some(value) = read(LicenseApiEnv::TeamIds)? {
            config.teams = parse_team_ids(&value)?;
        }
        if let Some(value) = read(LicenseApiEnv::TeamApiKeys)? {
            config.team_api_keys = parse_team_api_keys(&value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document into a configuration without consulting the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let config = Self::from_file_layer(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a setting is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "{} environment variable is required",
                LicenseApiEnv::ApiKey.as_str()
            )));
        }
        if self.customer_code.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "{} environment variable is required",
                LicenseApiEnv::CustomerCode.as_str()
            )));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|err| ConfigError::Invalid(format!("base_url is not a valid url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("base_url must use http or https".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::Invalid(
                "base_url must not carry a query or fragment".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be greater than zero".to_string()));
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_retries must not exceed {MAX_RETRIES_LIMIT}"
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".to_string()));
        }
        if !self.test_email_domain.starts_with('@') || self.test_email_domain.len() < 2 {
            return Err(ConfigError::Invalid(
                "test_email_domain must start with @ and name a domain".to_string(),
            ));
        }
        for (team, key) in &self.team_api_keys {
            if !self.teams.contains_id(*team) {
                return Err(ConfigError::Invalid(format!(
                    "team api key configured for unknown team {team}"
                )));
            }
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("team api key for {team} is empty")));
            }
        }
        Ok(())
    }

    /// Returns the absolute URL for an endpoint.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }

    /// Returns the API key scoped to a team, when configured.
    #[must_use]
    pub fn api_key_for_team(&self, team: TeamId) -> Option<&str> {
        self.team_api_keys.get(&team).map(String::as_str)
    }

    /// Applies a TOML base layer on top of built-in defaults.
    fn from_file_layer(file: FileConfig) -> Result<Self, ConfigError> {
        let mut config = Self::new(
            file.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            file.api_key.unwrap_or_default(),
            file.customer_code.unwrap_or_default(),
        );
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = file.max_retries {
            config.max_retries = retries;
        }
        if let Some(millis) = file.retry_backoff_ms {
            config.retry_backoff = Duration::from_millis(millis);
        }
        if let Some(user_agent) = file.user_agent {
            config.user_agent = user_agent;
        }
        if let Some(domain) = file.test_email_domain {
            config.test_email_domain = domain;
        }
        if !file.teams.is_empty() {
            config.teams = TeamDirectory::from_entries(
                file.teams.into_iter().map(|(name, id)| (name, TeamId::new(id))),
            )
            .map_err(ConfigError::Invalid)?;
        }
        for (team, key) in file.team_api_keys {
            let team: TeamId = team.parse().map_err(ConfigError::Invalid)?;
            config.team_api_keys.insert(team, key);
        }
        Ok(config)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads and parses the TOML base layer with a size limit.
fn read_file_layer(path: &Path) -> Result<FileConfig, ConfigError> {
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
    toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
}

/// Parses `JETBRAINS_TEAM_IDS` into a directory.
fn parse_team_ids(raw: &str) -> Result<TeamDirectory, ConfigError> {
    let name = LicenseApiEnv::TeamIds.as_str();
    let pairs = parse_pairs(name, raw).map_err(ConfigError::Env)?;
    let mut entries = Vec::with_capacity(pairs.len());
    for (team_name, id) in pairs {
        let id: TeamId = id.parse().map_err(|err| ConfigError::Env(format!("{name}: {err}")))?;
        entries.push((team_name, id));
    }
    TeamDirectory::from_entries(entries).map_err(|err| ConfigError::Env(format!("{name}: {err}")))
}

/// Parses `JETBRAINS_TEAM_API_KEYS` into a team-to-key map.
fn parse_team_api_keys(raw: &str) -> Result<BTreeMap<TeamId, String>, ConfigError> {
    let name = LicenseApiEnv::TeamApiKeys.as_str();
    let pairs = parse_pairs(name, raw).map_err(ConfigError::Env)?;
    let mut keys = BTreeMap::new();
    for (team, key) in pairs {
        let team: TeamId =
            team.parse().map_err(|err| ConfigError::Env(format!("{name}: {err}")))?;
        if keys.insert(team, key).is_some() {
            return Err(ConfigError::Env(format!("{name}: team {team} is listed more than once")));
        }
    }
    Ok(keys)
}
