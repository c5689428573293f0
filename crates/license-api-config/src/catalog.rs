// crates/license-api-config/src/catalog.rs
// ============================================================================
// Module: Error Catalog
// Description: Known error codes and their expected descriptions.
// Purpose: Give negative scenarios one place to look up expected payloads.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Failing requests return `{code, description}`. Some codes carry a fixed
//! description; others echo the rejected input, which is modeled as a `None`
//! expected description so the suite compares against the value it sent.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Error codes documented by the license API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No `X-Api-Key` header was sent.
    MissingTokenHeader,
    /// The API key is not recognized.
    InvalidToken,
    /// The API key is scoped to a different team or key type.
    TokenTypeMismatch,
    /// The contact email was rejected.
    InvalidContactEmail,
    /// The contact first or last name was rejected.
    InvalidContactName,
    /// The license ID does not exist.
    LicenseNotFound,
    /// The license is already assigned.
    LicenseIsNotAvailableToAssign,
    /// The team ID does not exist.
    TeamNotFound,
}

impl ErrorCode {
    /// Every known code, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::MissingTokenHeader,
        Self::InvalidToken,
        Self::TokenTypeMismatch,
        Self::InvalidContactEmail,
        Self::InvalidContactName,
        Self::LicenseNotFound,
        Self::LicenseIsNotAvailableToAssign,
        Self::TeamNotFound,
    ];

    /// Returns the wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingTokenHeader => "MISSING_TOKEN_HEADER",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenTypeMismatch => "TOKEN_TYPE_MISMATCH",
            Self::InvalidContactEmail => "INVALID_CONTACT_EMAIL",
            Self::InvalidContactName => "INVALID_CONTACT_NAME",
            Self::LicenseNotFound => "LICENSE_NOT_FOUND",
            Self::LicenseIsNotAvailableToAssign => "LICENSE_IS_NOT_AVAILABLE_TO_ASSIGN",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
        }
    }

    /// Parses a wire code.
    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == raw)
    }

    /// Returns the expected descriptor for this code.
    #[must_use]
    pub const fn descriptor(self) -> ErrorDescriptor {
        let description = match self {
            Self::MissingTokenHeader => Some("X-Api-Key header is required"),
            Self::InvalidToken => Some("The token provided is invalid"),
            Self::LicenseIsNotAvailableToAssign => Some("ALLOCATED"),
            Self::TokenTypeMismatch
            | Self::InvalidContactEmail
            | Self::InvalidContactName
            | Self::LicenseNotFound
            | Self::TeamNotFound => None,
        };
        ErrorDescriptor {
            code: self,
            description,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected `(code, description)` pair for a failure condition.
///
/// # Invariants
/// - `description == None` means the server echoes request-specific input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDescriptor {
    /// Expected error code.
    pub code: ErrorCode,
    /// Fixed expected description, when the server uses one.
    pub description: Option<&'static str>,
}

/// Description returned when a contact name exceeds the length limit.
pub const NAME_TOO_LONG_DESCRIPTION: &str = "Value is too long.";
/// Description returned when a contact name contains special characters.
pub const NAME_SPECIAL_CHARACTERS_DESCRIPTION: &str = "Please, don't use special characters.";
