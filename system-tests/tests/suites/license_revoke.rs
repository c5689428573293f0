// system-tests/tests/suites/license_revoke.rs
// ============================================================================
// Module: License Revoke Tests
// Description: Assign-then-revoke round trip and unknown-license revoke.
// Purpose: Confirm revocation returns licenses to the available pool.
// Dependencies: system-tests helpers, license-api-client, license-api-config
// ============================================================================

use helpers::fixtures::TestResult;
use helpers::fixtures::TestSetup;
use license_api_client::AssignLicenseRequest;
use license_api_config::ErrorCode;
use license_api_config::status;
use system_tests::checks::Checks;
use system_tests::precondition::Precondition;
use system_tests::precondition::classify;
use system_tests::require;

use crate::helpers;

#[test]
fn revoke_assigned_license_round_trip() -> TestResult {
    let mut setup = TestSetup::new("revoke_assigned_license_round_trip")?;
    let license_id = require!(setup, setup.available_license(None)?);
    let contact = setup.generator.contact();

    let mut checks = Checks::new("assign then revoke");
    let assigned = setup.client.assign(&AssignLicenseRequest::for_contact(&contact, &license_id))?;
    if checks.status("assign", &assigned, status::OK) {
        let revoked = setup.client.revoke(&license_id)?;
        if checks.status("revoke", &revoked, status::OK) {
            let available = classify(setup.client.available_licenses(None))?;
            let returned =
                matches!(&available, Precondition::Met(ids) if ids.contains(&license_id));
            checks.check(returned, || {
                format!("license {license_id} is not available after revoke")
            });
        }
    }
    setup.note(format!("round trip on {license_id}"));
    setup.finish(checks, "revoked license is available again")
}

#[test]
fn revoke_unknown_license() -> TestResult {
    let mut setup = TestSetup::new("revoke_unknown_license")?;
    let license_id = setup.generator.invalid_license_id();

    let response = setup.client.revoke(&license_id)?;

    let mut checks = Checks::new("unknown license");
    checks.api_error(
        "revoke",
        &response,
        status::NOT_FOUND,
        ErrorCode::LicenseNotFound,
        Some(license_id.as_str()),
    );
    setup.finish(checks, "unknown license rejected")
}
