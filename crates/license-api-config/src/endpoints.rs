// crates/license-api-config/src/endpoints.rs
// ============================================================================
// Module: License API Endpoints
// Description: Endpoint paths consumed by the harness.
// Purpose: Keep path literals out of client and suite code.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Endpoint paths are relative to the configured base URL.

use std::fmt;

/// Remote endpoints exercised by the test harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST` assign a license to a contact.
    AssignLicense,
    /// `POST` move licenses between teams.
    ChangeLicensesTeam,
    /// `GET` list licenses with optional filters.
    Licenses,
    /// `POST` revoke an assigned license.
    RevokeLicense,
}

impl Endpoint {
    /// Every endpoint, in declaration order.
    pub const ALL: [Self; 4] =
        [Self::AssignLicense, Self::ChangeLicensesTeam, Self::Licenses, Self::RevokeLicense];

    /// Returns the path relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::AssignLicense => "/customer/licenses/assign",
            Self::ChangeLicensesTeam => "/customer/changeLicensesTeam",
            Self::Licenses => "/customer/licenses",
            Self::RevokeLicense => "/customer/licenses/revoke",
        }
    }

    /// Returns the HTTP method the endpoint is called with.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::Licenses => "GET",
            Self::AssignLicense | Self::ChangeLicensesTeam | Self::RevokeLicense => "POST",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
