// system-tests/tests/suites/license_assignment.rs
// ============================================================================
// Module: License Assignment Tests
// Description: Positive and negative cases for the assign endpoint.
// Purpose: Pin status codes and error descriptors for license assignment.
// Dependencies: system-tests helpers, license-api-client, license-test-data
// ============================================================================

//! ## Overview
//! Assignment scenarios against the live API: a valid assignment, contact
//! validation (emails, empty fields, overlong and special-character names),
//! credentials, unknown licenses, malformed JSON, and double assignment.
//! Catalog-driven cases check every entry and report all mismatches at once.

use helpers::fixtures::ClientVariant;
use helpers::fixtures::TestResult;
use helpers::fixtures::TestSetup;
use license_api_client::AssignLicenseRequest;
use license_api_client::Contact;
use license_api_config::ErrorCode;
use license_api_config::catalog::NAME_SPECIAL_CHARACTERS_DESCRIPTION;
use license_api_config::catalog::NAME_TOO_LONG_DESCRIPTION;
use license_api_config::status;
use license_test_data::ContactField;
use system_tests::checks::Checks;
use system_tests::require;

use crate::helpers;

/// Returns `contact` with one field replaced.
fn with_field(contact: &Contact, field: ContactField, value: &str) -> Contact {
    let mut contact = contact.clone();
    match field {
        ContactField::Email => contact.email = value.to_string(),
        ContactField::FirstName => contact.first_name = value.to_string(),
        ContactField::LastName => contact.last_name = value.to_string(),
    }
    contact
}

// ============================================================================
// SECTION: Positive
// ============================================================================

#[test]
fn assign_license_valid() -> TestResult {
    let mut setup = TestSetup::new("assign_license_valid")?;
    let license_id = require!(setup, setup.available_license(None)?);
    let contact = setup.generator.contact();

    let response = setup.client.assign(&AssignLicenseRequest::for_contact(&contact, &license_id))?;

    let mut checks = Checks::new("valid assignment");
    checks.status("assign", &response, status::OK);
    checks.empty_body("assign", &response);
    setup.note(format!("assigned {license_id} to {}", contact.email));
    setup.finish(checks, "valid assignment accepted")
}

// ============================================================================
// SECTION: Contact Validation
// ============================================================================

#[test]
fn assign_license_invalid_emails() -> TestResult {
    let mut setup = TestSetup::new("assign_license_invalid_emails")?;
    let license_id = require!(setup, setup.available_license(None)?);
    let contact = setup.generator.contact();

    let mut checks = Checks::new("invalid emails");
    for email in setup.generator.invalid_emails() {
        let request = AssignLicenseRequest::for_contact(
            &with_field(&contact, ContactField::Email, &email),
            &license_id,
        );
        let response = setup.client.assign(&request)?;
        checks.api_error(
            &format!("email `{email}`"),
            &response,
            status::BAD_REQUEST,
            ErrorCode::InvalidContactEmail,
            Some(email.as_str()),
        );
    }
    setup.finish(checks, "every malformed email rejected")
}

#[test]
fn assign_license_empty_fields() -> TestResult {
    let mut setup = TestSetup::new("assign_license_empty_fields")?;
    let license_id = require!(setup, setup.available_license(None)?);
    let contact = setup.generator.contact();

    let mut checks = Checks::new("empty required fields");
    for field in ContactField::ALL {
        let request =
            AssignLicenseRequest::for_contact(&with_field(&contact, field, ""), &license_id);
        let response = setup.client.assign(&request)?;
        checks.status(&format!("empty {field}"), &response, status::BAD_REQUEST);
    }
    let response = setup.client.assign(&AssignLicenseRequest::for_contact(&contact, ""))?;
    checks.status("empty licenseId", &response, status::NOT_FOUND);
    setup.finish(checks, "empty fields rejected")
}

#[test]
fn assign_license_overlong_names() -> TestResult {
    let mut setup = TestSetup::new("assign_license_overlong_names")?;
    let license_id = require!(setup, setup.available_license(None)?);
    let contact = setup.generator.contact();
    let boundary = setup.generator.boundary_data();

    let mut checks = Checks::new("overlong names");
    for (field, value) in &boundary.very_long_strings {
        let request =
            AssignLicenseRequest::for_contact(&with_field(&contact, *field, value), &license_id);
        let response = setup.client.assign(&request)?;
        checks.api_error(
            &format!("overlong {field}"),
            &response,
            status::BAD_REQUEST,
            ErrorCode::InvalidContactName,
            Some(NAME_TOO_LONG_DESCRIPTION),
        );
    }
    setup.finish(checks, "overlong names rejected")
}

#[test]
fn assign_license_special_character_names() -> TestResult {
    let mut setup = TestSetup::new("assign_license_special_character_names")?;
    let license_id = require!(setup, setup.available_license(None)?);
    let contact = setup.generator.contact();
    let boundary = setup.generator.boundary_data();

    let mut checks = Checks::new("special character names");
    for (field, value) in &boundary.special_characters {
        let request =
            AssignLicenseRequest::for_contact(&with_field(&contact, *field, value), &license_id);
        let response = setup.client.assign(&request)?;
        checks.api_error(
            &format!("special characters in {field}"),
            &response,
            status::BAD_REQUEST,
            ErrorCode::InvalidContactName,
            Some(NAME_SPECIAL_CHARACTERS_DESCRIPTION),
        );
    }
    setup.finish(checks, "special characters rejected")
}

// ============================================================================
// SECTION: Credentials
// ============================================================================

#[test]
fn assign_license_missing_api_key() -> TestResult {
    let mut setup = TestSetup::new("assign_license_missing_api_key")?;
    let license_id = require!(setup, setup.available_license(None)?);
    let client = require!(setup, setup.client_for(ClientVariant::MissingApiKey)?);
    let contact = setup.generator.contact();

    let response = client.assign(&AssignLicenseRequest::for_contact(&contact, &license_id))?;

    let mut checks = Checks::new("missing api key");
    checks.catalog_error("assign", &response, status::UNAUTHORIZED, ErrorCode::MissingTokenHeader);
    setup.finish(checks, "missing key rejected")
}

#[test]
fn assign_license_invalid_api_key() -> TestResult {
    let mut setup = TestSetup::new("assign_license_invalid_api_key")?;
    let license_id = require!(setup, setup.available_license(None)?);
    let client = require!(setup, setup.client_for(ClientVariant::InvalidApiKey)?);
    let contact = setup.generator.contact();

    let response = client.assign(&AssignLicenseRequest::for_contact(&contact, &license_id))?;

    let mut checks = Checks::new("invalid api key");
    checks.catalog_error("assign", &response, status::UNAUTHORIZED, ErrorCode::InvalidToken);
    setup.finish(checks, "invalid key rejected")
}

// ============================================================================
// SECTION: License State
// ============================================================================

#[test]
fn assign_license_unknown_license() -> TestResult {
    let mut setup = TestSetup::new("assign_license_unknown_license")?;
    let contact = setup.generator.contact();
    let license_id = setup.generator.invalid_license_id();

    let response = setup.client.assign(&AssignLicenseRequest::for_contact(&contact, &license_id))?;

    let mut checks = Checks::new("unknown license");
    checks.api_error(
        "assign",
        &response,
        status::NOT_FOUND,
        ErrorCode::LicenseNotFound,
        Some(license_id.as_str()),
    );
    setup.finish(checks, "unknown license rejected")
}

#[test]
fn assign_license_malformed_json() -> TestResult {
    let setup = TestSetup::new("assign_license_malformed_json")?;

    let mut checks = Checks::new("malformed json");
    for body in setup.generator.invalid_json_catalog() {
        let response = setup.client.assign_raw(body)?;
        checks.status(&format!("body `{body}`"), &response, status::BAD_REQUEST);
    }
    setup.finish(checks, "malformed bodies rejected")
}

#[test]
fn assign_license_already_assigned() -> TestResult {
    let mut setup = TestSetup::new("assign_license_already_assigned")?;
    let license_id = require!(setup, setup.assigned_license(None)?);
    let contact = setup.generator.contact();

    let response = setup.client.assign(&AssignLicenseRequest::for_contact(&contact, &license_id))?;

    let mut checks = Checks::new("already assigned");
    checks.catalog_error(
        "assign",
        &response,
        status::BAD_REQUEST,
        ErrorCode::LicenseIsNotAvailableToAssign,
    );
    setup.finish(checks, "double assignment rejected")
}
