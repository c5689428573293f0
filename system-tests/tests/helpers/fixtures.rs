// system-tests/tests/helpers/fixtures.rs
// ============================================================================
// Module: Test Fixtures
// Description: Per-test setup: clients, generator, reporter, preconditions.
// Purpose: Resolve credentials and shared remote state once per test.
// Dependencies: system-tests, license-api-client, license-api-config,
//               license-test-data
// ============================================================================

//! ## Overview
//! [`TestSetup`] is the single entry point for a live test. It shares one
//! HTTP session across the whole binary and gives each test its own
//! transcript, seeded generator, and reporter. It also holds the license pool
//! lock, so tests that pick and mutate licenses never interleave. Helpers that depend on remote
//! state return [`Precondition`] so suites can skip with a recorded reason.

use std::error::Error;
use std::sync::OnceLock;

use license_api_client::LicenseClient;
use license_api_config::LicenseApiConfig;
use license_api_config::TeamId;
use license_test_data::DEFAULT_SEED;
use license_test_data::TestDataGenerator;
use system_tests::checks::Checks;
use system_tests::config::SystemTestConfig;
use system_tests::pool::PoolGuard;
use system_tests::pool::lock_pool;
use system_tests::precondition::Precondition;
use system_tests::precondition::classify;

use super::artifacts::TestReporter;
use super::logging;

/// API key the server must not recognize.
pub const INVALID_API_KEY: &str = "invalid_api_key_12345";

/// Result type of every live test.
pub type TestResult = Result<(), Box<dyn Error>>;

// ============================================================================
// SECTION: Client Variants
// ============================================================================

/// Credential shape a test sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientVariant {
    /// Configured API key and customer code.
    Authorized,
    /// No default headers at all.
    MissingApiKey,
    /// A key the server does not know.
    InvalidApiKey,
    /// The key scoped to the given team.
    WrongTeamKey(TeamId),
}

/// Configuration and base client shared by every test in a binary.
struct Shared {
    /// Loaded settings.
    config: LicenseApiConfig,
    /// Session every per-test client derives from.
    client: LicenseClient,
}

/// Loads the shared configuration and session on first use.
fn shared() -> Result<&'static Shared, String> {
    static SHARED: OnceLock<Result<Shared, String>> = OnceLock::new();
    SHARED
        .get_or_init(|| {
            let config = LicenseApiConfig::load().map_err(|err| err.to_string())?;
            let client = LicenseClient::new(&config).map_err(|err| err.to_string())?;
            Ok(Shared {
                config,
                client,
            })
        })
        .as_ref()
        .map_err(Clone::clone)
}

// ============================================================================
// SECTION: Test Setup
// ============================================================================

/// Everything one live test needs.
pub struct TestSetup {
    /// Loaded settings.
    pub config: LicenseApiConfig,
    /// Authorized client recording into this test's transcript.
    pub client: LicenseClient,
    /// Input generator.
    pub generator: TestDataGenerator,
    /// Summary writer.
    reporter: TestReporter,
    /// Held for the whole test; dropped after the summary is written.
    _pool: PoolGuard,
}

impl TestSetup {
    /// Prepares a test named `test_name`.
    pub fn new(test_name: &str) -> Result<Self, Box<dyn Error>> {
        logging::init();
        let pool = lock_pool();
        let shared = shared()?;
        let harness = SystemTestConfig::load()?;
        let client = shared.client.with_fresh_transcript();
        let mut reporter = TestReporter::new(test_name)?;
        reporter.attach_transcript(client.transcript().clone());
        let generator = TestDataGenerator::seeded(harness.seed.unwrap_or(DEFAULT_SEED))
            .with_email_domain(shared.config.test_email_domain.clone());
        tracing::info!(test = test_name, base_url = %shared.config.base_url, "test setup ready");
        Ok(Self {
            config: shared.config.clone(),
            client,
            generator,
            reporter,
            _pool: pool,
        })
    }

    /// Resolves a client for `variant`, sharing this test's transcript.
    pub fn client_for(&self, variant: ClientVariant) -> Result<Precondition<LicenseClient>, Box<dyn Error>> {
        let client = match variant {
            ClientVariant::Authorized => self.client.clone(),
            ClientVariant::MissingApiKey => self.client.without_default_headers(),
            ClientVariant::InvalidApiKey => self.client.with_api_key(INVALID_API_KEY)?,
            ClientVariant::WrongTeamKey(team) => match self.config.api_key_for_team(team) {
                Some(key) => self.client.with_api_key(key)?,
                None => {
                    return Ok(Precondition::Unmet(format!(
                        "no team-scoped api key configured for team {team}"
                    )));
                }
            },
        };
        Ok(Precondition::Met(client))
    }

    /// Looks up a configured team by logical name.
    pub fn team(&self, name: &str) -> Result<TeamId, Box<dyn Error>> {
        Ok(self.config.teams.require(name)?)
    }

    /// Picks a random configured team.
    pub fn random_team(&mut self) -> Result<TeamId, Box<dyn Error>> {
        let name = self.generator.team_name(&self.config.teams).ok_or("no teams configured")?;
        self.team(&name)
    }

    /// Finds an available license, optionally within `team`.
    pub fn available_license(
        &self,
        team: Option<TeamId>,
    ) -> Result<Precondition<String>, Box<dyn Error>> {
        Ok(classify(self.client.available_license(team))?)
    }

    /// Finds an assigned license, optionally within `team`.
    pub fn assigned_license(&self, team: Option<TeamId>) -> Result<Precondition<String>, Box<dyn Error>> {
        Ok(classify(self.client.assigned_license(team))?)
    }

    /// Picks `count` distinct available licenses from the named team.
    pub fn available_licenses_from_team(
        &mut self,
        name: &str,
        count: usize,
    ) -> Result<Precondition<Vec<String>>, Box<dyn Error>> {
        let team = self.team(name)?;
        let found = match classify(self.client.available_licenses(Some(team)))? {
            Precondition::Met(ids) => ids,
            Precondition::Unmet(reason) => return Ok(Precondition::Unmet(reason)),
        };
        let available = found.len();
        Ok(self.generator.sample(&found, count).map_or_else(
            || {
                Precondition::Unmet(format!(
                    "not enough available licenses in {name}: required {count}, available {available}"
                ))
            },
            Precondition::Met,
        ))
    }

    /// Records a skip; used by `require!`.
    pub fn skip(&mut self, reason: &str) -> std::io::Result<()> {
        self.reporter.skip(reason)
    }

    /// Evaluates `checks` and writes the summary.
    pub fn finish(mut self, checks: Checks, note: &str) -> TestResult {
        match checks.finish() {
            Ok(passed) => {
                self.reporter.pass(vec![note.to_string(), format!("{passed} expectation(s) met")])?;
                Ok(())
            }
            Err(failed) => {
                self.reporter.fail(failed.failures.clone())?;
                Err(failed.into())
            }
        }
    }

    /// Adds a free-form note, written with the final summary.
    pub fn note(&mut self, note: impl Into<String>) {
        self.reporter.note(note.into());
    }
}
