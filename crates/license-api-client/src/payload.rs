// crates/license-api-client/src/payload.rs
// ============================================================================
// Module: License Payloads
// Description: Request builders and response records for license endpoints.
// Purpose: Produce exact wire JSON and validate required inputs locally.
// Dependencies: license-api-config, serde, serde_json
// ============================================================================

//! ## Overview
//! Builders here own the wire shape of license requests. Field order in the
//! serialized JSON follows declaration order of the private payload structs.
//! Invariants:
//! - An assignment request missing any of email, first name, last name, or
//!   license id fails validation before any network activity.
//! - `sourceTeamId` is omitted from change-team payloads when not given.

// ============================================================================
// SECTION: Imports
// ============================================================================

use license_api_config::TeamId;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::LicenseClientError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Product code used when none is given.
pub const DEFAULT_PRODUCT_CODE: &str = "II";
/// Team id placed in the nested license object when none is given.
pub const DEFAULT_ASSIGN_TEAM: TeamId = TeamId::new(1);

// ============================================================================
// SECTION: Contact
// ============================================================================

/// Person a license is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl Contact {
    /// Builds a contact.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

// ============================================================================
// SECTION: Assignment
// ============================================================================

/// Builder for an assign-license request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignLicenseRequest {
    /// Contact email.
    email: Option<String>,
    /// Contact given name.
    first_name: Option<String>,
    /// Contact family name.
    last_name: Option<String>,
    /// License to assign.
    license_id: Option<String>,
    /// Product code for the nested license object.
    product_code: String,
    /// Team for the nested license object.
    team_id: TeamId,
    /// Whether the server should email the assignee.
    send_email: bool,
    /// Whether the response should carry an offline activation code.
    include_offline_activation_code: bool,
}

impl Default for AssignLicenseRequest {
    fn default() -> Self {
        Self {
            email: None,
            first_name: None,
            last_name: None,
            license_id: None,
            product_code: DEFAULT_PRODUCT_CODE.to_string(),
            team_id: DEFAULT_ASSIGN_TEAM,
            send_email: false,
            include_offline_activation_code: true,
        }
    }
}

impl AssignLicenseRequest {
    /// Starts an empty request with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request for a contact and license.
    #[must_use]
    pub fn for_contact(contact: &Contact, license_id: impl Into<String>) -> Self {
        Self::new().contact(contact).license_id(license_id)
    }

    /// Sets all contact fields.
    #[must_use]
    pub fn contact(self, contact: &Contact) -> Self {
        self.email(contact.email.clone())
            .first_name(contact.first_name.clone())
            .last_name(contact.last_name.clone())
    }

    /// Sets the email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the first name.
    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Sets the last name.
    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Sets the license id.
    #[must_use]
    pub fn license_id(mut self, license_id: impl Into<String>) -> Self {
        self.license_id = Some(license_id.into());
        self
    }

    /// Sets the product code.
    #[must_use]
    pub fn product_code(mut self, product_code: impl Into<String>) -> Self {
        self.product_code = product_code.into();
        self
    }

    /// Sets the team placed in the nested license object.
    #[must_use]
    pub const fn team_id(mut self, team_id: TeamId) -> Self {
        self.team_id = team_id;
        self
    }

    /// Sets whether the server emails the assignee.
    #[must_use]
    pub const fn send_email(mut self, send_email: bool) -> Self {
        self.send_email = send_email;
        self
    }

    /// Sets whether an offline activation code is requested.
    #[must_use]
    pub const fn include_offline_activation_code(mut self, include: bool) -> Self {
        self.include_offline_activation_code = include;
        self
    }

    /// Renders the wire payload.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseClientError::Validation`] naming every missing field.
    pub fn to_payload(&self) -> Result<Value, LicenseClientError> {
        let missing: Vec<&str> = [
            ("email", self.email.is_none()),
            ("first_name", self.first_name.is_none()),
            ("last_name", self.last_name.is_none()),
            ("license_id", self.license_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();
        let (Some(email), Some(first_name), Some(last_name), Some(license_id)) =
            (&self.email, &self.first_name, &self.last_name, &self.license_id)
        else {
            return Err(LicenseClientError::Validation(format!(
                "email, first_name, last_name, and license_id are required; missing: {}",
                missing.join(", ")
            )));
        };
        let payload = AssignPayload {
            contact: ContactPayload {
                email,
                first_name,
                last_name,
            },
            include_offline_activation_code: self.include_offline_activation_code,
            license: LicensePayload {
                product_code: &self.product_code,
                team: self.team_id,
            },
            license_id,
            send_email: self.send_email,
        };
        serde_json::to_value(payload)
            .map_err(|err| LicenseClientError::Validation(format!("payload encoding: {err}")))
    }
}

/// Wire shape of an assignment.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignPayload<'a> {
    /// Assignee.
    contact: ContactPayload<'a>,
    /// Offline activation code flag.
    include_offline_activation_code: bool,
    /// Nested license descriptor.
    license: LicensePayload<'a>,
    /// License to assign.
    license_id: &'a str,
    /// Email notification flag.
    send_email: bool,
}

/// Wire shape of the assignee.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactPayload<'a> {
    /// Email.
    email: &'a str,
    /// Given name.
    first_name: &'a str,
    /// Family name.
    last_name: &'a str,
}

/// Wire shape of the nested license object.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LicensePayload<'a> {
    /// Product code.
    product_code: &'a str,
    /// Team id.
    team: TeamId,
}

// ============================================================================
// SECTION: Change Team
// ============================================================================

/// Payload for moving licenses between teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTeamRequest {
    /// Licenses to move; may be empty.
    pub license_ids: Vec<String>,
    /// Destination team.
    pub target_team_id: TeamId,
    /// Origin team, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_team_id: Option<TeamId>,
}

impl ChangeTeamRequest {
    /// Builds a change-team payload.
    #[must_use]
    pub fn new(license_ids: &[String], target_team_id: TeamId, source_team_id: Option<TeamId>) -> Self {
        Self {
            license_ids: license_ids.to_vec(),
            target_team_id,
            source_team_id,
        }
    }
}

/// Success body of a change-team call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTeamResponse {
    /// Licenses that were moved.
    pub license_ids: Vec<String>,
}

// ============================================================================
// SECTION: Listing
// ============================================================================

/// One license record from the listing endpoint.
///
/// Only the fields the harness relies on are typed; the rest are kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseSummary {
    /// License identifier.
    #[serde(default)]
    pub license_id: Option<String>,
    /// Whether the license can be assigned.
    #[serde(default)]
    pub is_available_to_assign: Option<bool>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LicenseSummary {
    /// True when the record has a non-empty id and is explicitly available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.has_id() && self.is_available_to_assign == Some(true)
    }

    /// True when the record has a non-empty id and is explicitly unavailable.
    ///
    /// A record without the availability flag is neither available nor
    /// assigned.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.has_id() && self.is_available_to_assign == Some(false)
    }

    /// An empty id counts as missing.
    fn has_id(&self) -> bool {
        self.license_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}
