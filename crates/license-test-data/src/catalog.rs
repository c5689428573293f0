// crates/license-test-data/src/catalog.rs
// ============================================================================
// Module: Input Catalogs
// Description: Fixed lists of malformed and boundary inputs.
// Purpose: Keep negative-test inputs reviewable in one place.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Each catalog entry is exercised by a live suite. Duplicates are kept
//! where the catalog intentionally repeats a case.

use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// SECTION: Contact Fields
// ============================================================================

/// Contact fields that boundary cases vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    /// `email`
    Email,
    /// `firstName`
    FirstName,
    /// `lastName`
    LastName,
}

impl ContactField {
    /// Every field, in payload order.
    pub const ALL: [Self; 3] = [Self::Email, Self::FirstName, Self::LastName];

    /// Returns the JSON field name.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ============================================================================
// SECTION: Emails
// ============================================================================

/// Addresses the API must reject as contact emails.
pub const INVALID_EMAILS: [&str; 16] = [
    "",
    "invalid-email",
    "@domain.com",
    "user@",
    "user@.com",
    "user@domain",
    "user name@domain.com",
    "user@domain .com",
    "user@@domain.com",
    "user@domain..com",
    "user@",
    "user@domain,com",
    "very-long-email-address-that-exceeds-normal-limits@very-long-domain-name-that-should-not-be-accepted.com",
    "user@domain.c",
    "user@-domain.com",
    "user@domain-.com",
];

// ============================================================================
// SECTION: JSON
// ============================================================================

/// Request bodies that are not valid JSON.
pub const INVALID_JSON: [&str; 9] = [
    r#"{"key": value}"#,
    r#"{"key": "value",}"#,
    r#"{key: "value"}"#,
    r#"{"key": "value""#,
    r#""key": "value"}"#,
    r#"{"key": "value" "key2": "value2"}"#,
    r#"{"key": "value\"}"#,
    r#"{"key": "value";}"#,
    r#"{"key": "value":]"#,
];

// ============================================================================
// SECTION: Boundary Data
// ============================================================================

/// Length of each overlong name.
pub const OVERLONG_NAME_LENGTH: usize = 500;

/// Name values at or beyond the accepted limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryData {
    /// Names far past the length limit.
    pub very_long_strings: BTreeMap<ContactField, String>,
    /// Names made of disallowed punctuation.
    pub special_characters: BTreeMap<ContactField, String>,
}

impl BoundaryData {
    /// Builds the fixed boundary cases.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            very_long_strings: BTreeMap::from([
                (ContactField::FirstName, "a".repeat(OVERLONG_NAME_LENGTH)),
                (ContactField::LastName, "b".repeat(OVERLONG_NAME_LENGTH)),
            ]),
            special_characters: BTreeMap::from([
                (ContactField::FirstName, "Special@#$%^&*()".to_string()),
                (ContactField::LastName, "Chars!@#$%^&*()".to_string()),
            ]),
        }
    }
}

// ============================================================================
// SECTION: Names
// ============================================================================

/// Given names drawn for valid contacts.
pub(crate) const FIRST_NAMES: [&str; 20] = [
    "Alice", "Boris", "Chloe", "Dmitri", "Elena", "Felix", "Grace", "Hugo", "Irina", "Jonas",
    "Karin", "Leon", "Maya", "Nikolai", "Olga", "Pavel", "Quinn", "Rosa", "Stefan", "Tanya",
];

/// Family names drawn for valid contacts.
pub(crate) const LAST_NAMES: [&str; 20] = [
    "Anderson", "Bauer", "Carter", "Dvorak", "Evans", "Fischer", "Garcia", "Hoffmann", "Ivanova",
    "Jensen", "Kowalski", "Larsen", "Moreau", "Novak", "Olsen", "Petrov", "Quinlan", "Richter",
    "Schmidt", "Turner",
];
