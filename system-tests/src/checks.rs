// system-tests/src/checks.rs
// ============================================================================
// Module: Soft Checks
// Description: Collector for non-fatal expectations over API responses.
// Purpose: Report every mismatch in a response before failing a test.
// Dependencies: license-api-client, license-api-config, thiserror
// ============================================================================

//! ## Overview
//! A [`Checks`] value accumulates failed expectations instead of panicking on
//! the first one. Suites call [`Checks::finish`] once at the end so a single
//! run diagnoses status, code, and description together, and a catalog loop
//! reports every bad entry rather than only the first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;

use license_api_client::HttpResponse;
use license_api_config::ErrorCode;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Longest response excerpt quoted in a failure message.
const BODY_EXCERPT_LIMIT: usize = 300;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Raised by [`Checks::finish`] when any expectation failed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{context}: {} check(s) failed\n- {}", failures.len(), failures.join("\n- "))]
pub struct ChecksFailed {
    /// Scenario the checks belonged to.
    pub context: String,
    /// Failure messages in recording order.
    pub failures: Vec<String>,
}

// ============================================================================
// SECTION: Collector
// ============================================================================

/// Soft-assertion collector.
#[derive(Debug, Clone, Default)]
pub struct Checks {
    /// Scenario name.
    context: String,
    /// Failure messages.
    failures: Vec<String>,
    /// Count of satisfied expectations.
    passed: usize,
}

impl Checks {
    /// Starts an empty collector for a scenario.
    #[must_use]
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            failures: Vec::new(),
            passed: 0,
        }
    }

    /// Records `message` when `condition` is false.
    pub fn check(&mut self, condition: bool, message: impl FnOnce() -> String) -> bool {
        if condition {
            self.passed = self.passed.saturating_add(1);
        } else {
            self.failures.push(message());
        }
        condition
    }

    /// Records a failure unconditionally.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.failures.push(message.into());
    }

    /// Expects two values to be equal.
    pub fn equal<T>(&mut self, label: &str, actual: &T, expected: &T) -> bool
    where
        T: PartialEq + Display + ?Sized,
    {
        self.check(actual == expected, || format!("{label}: expected `{expected}`, got `{actual}`"))
    }

    /// Expects a response status.
    pub fn status(&mut self, label: &str, response: &HttpResponse, expected: u16) -> bool {
        self.check(response.status() == expected, || {
            format!(
                "{label}: expected status {expected}, got {} (body: {})",
                response.status(),
                excerpt(response.text())
            )
        })
    }

    /// Expects an empty response body.
    pub fn empty_body(&mut self, label: &str, response: &HttpResponse) -> bool {
        self.check(response.is_empty_body(), || {
            format!("{label}: expected empty body, got {}", excerpt(response.text()))
        })
    }

    /// Expects an error body carrying `code`.
    pub fn error_code(&mut self, label: &str, response: &HttpResponse, code: ErrorCode) -> bool {
        match response.error_body() {
            Some(body) => self.equal(&format!("{label} code"), body.code.as_str(), code.as_str()),
            None => {
                self.fail(format!(
                    "{label}: expected error body with code {}, got {}",
                    code.as_str(),
                    excerpt(response.text())
                ));
                false
            }
        }
    }

    /// Expects an error body whose description equals `expected`.
    pub fn error_description(&mut self, label: &str, response: &HttpResponse, expected: &str) -> bool {
        let actual = response.error_body().and_then(|body| body.description);
        match actual {
            Some(actual) => self.equal(&format!("{label} description"), actual.as_str(), expected),
            None => {
                self.fail(format!(
                    "{label}: expected description `{expected}`, got {}",
                    excerpt(response.text())
                ));
                false
            }
        }
    }

    /// Expects status, code, and optionally description in one call.
    pub fn api_error(
        &mut self,
        label: &str,
        response: &HttpResponse,
        status: u16,
        code: ErrorCode,
        description: Option<&str>,
    ) -> bool {
        let status_ok = self.status(label, response, status);
        let code_ok = self.error_code(label, response, code);
        let description_ok =
            description.is_none_or(|expected| self.error_description(label, response, expected));
        status_ok && code_ok && description_ok
    }

    /// Expects the catalog description for `code` when it has one.
    pub fn catalog_error(&mut self, label: &str, response: &HttpResponse, status: u16, code: ErrorCode) -> bool {
        self.api_error(label, response, status, code, code.descriptor().description)
    }

    /// Returns recorded failures.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Returns the number of satisfied expectations.
    #[must_use]
    pub const fn passed(&self) -> usize {
        self.passed
    }

    /// Returns true when nothing has failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Ends the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksFailed`] listing every failure when any was recorded.
    pub fn finish(self) -> Result<usize, ChecksFailed> {
        if self.failures.is_empty() {
            Ok(self.passed)
        } else {
            Err(ChecksFailed {
                context: self.context,
                failures: self.failures,
            })
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Shortens a body for inclusion in a failure message.
fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }
    let mut out: String = trimmed.chars().take(BODY_EXCERPT_LIMIT).collect();
    if trimmed.chars().count() > BODY_EXCERPT_LIMIT {
        out.push_str("...");
    }
    out
}
