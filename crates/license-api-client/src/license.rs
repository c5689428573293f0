// crates/license-api-client/src/license.rs
// ============================================================================
// Module: License Client
// Description: Domain operations over the license management API.
// Purpose: Assign, move, list, and revoke licenses; derive setup helpers.
// Dependencies: license-api-config, serde_json, tracing
// ============================================================================

//! ## Overview
//! [`LicenseClient`] maps each license endpoint to one method returning the
//! raw [`HttpResponse`], so suites assert on status and body themselves. The
//! helper queries ([`LicenseClient::available_licenses`] and friends) are the
//! exception: they interpret the listing and fail when it is unusable, since
//! tests rely on them for setup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use license_api_config::Endpoint;
use license_api_config::LicenseApiConfig;
use license_api_config::TeamId;
use tracing::debug;

use crate::error::LicenseClientError;
use crate::http::API_KEY_HEADER;
use crate::http::ApiRequest;
use crate::http::HttpClient;
use crate::payload::AssignLicenseRequest;
use crate::payload::ChangeTeamRequest;
use crate::payload::LicenseSummary;
use crate::response::HttpResponse;
use crate::transcript::Transcript;

// ============================================================================
// SECTION: Client
// ============================================================================

/// Typed client for the license endpoints.
#[derive(Debug, Clone)]
pub struct LicenseClient {
    /// HTTP session.
    http: HttpClient,
}

impl LicenseClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseClientError::Http`] when the session cannot be built.
    pub fn new(config: &LicenseApiConfig) -> Result<Self, LicenseClientError> {
        Ok(Self::from_http(HttpClient::new(config)?))
    }

    /// Wraps an existing HTTP client.
    #[must_use]
    pub const fn from_http(http: HttpClient) -> Self {
        Self {
            http,
        }
    }

    /// Returns the HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the transcript of calls made through this client.
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        self.http.transcript()
    }

    /// Returns a copy sending `key` as the API key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseClientError::Http`] when the key is not a valid header
    /// value.
    pub fn with_api_key(&self, key: &str) -> Result<Self, LicenseClientError> {
        Ok(Self::from_http(self.http.with_header(API_KEY_HEADER, key)?))
    }

    /// Returns a copy that sends no API key.
    #[must_use]
    pub fn without_api_key(&self) -> Self {
        Self::from_http(self.http.without_header(API_KEY_HEADER))
    }

    /// Returns a copy that sends none of the default headers.
    #[must_use]
    pub fn without_default_headers(&self) -> Self {
        Self::from_http(self.http.clear_default_headers())
    }

    /// Returns a copy recording into a new transcript.
    #[must_use]
    pub fn with_fresh_transcript(&self) -> Self {
        Self::from_http(self.http.with_fresh_transcript())
    }

    // ------------------------------------------------------------------------
    // Endpoint calls
    // ------------------------------------------------------------------------

    /// Assigns a license to a contact.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseClientError::Validation`] without sending anything
    /// when a required field is missing, or [`LicenseClientError::Http`] on
    /// transport failure.
    pub fn assign(&self, request: &AssignLicenseRequest) -> Result<HttpResponse, LicenseClientError> {
        let payload = request.to_payload()?;
        let call = ApiRequest::post(Endpoint::AssignLicense.path()).json(payload);
        Ok(self.http.send(&call)?)
    }

    /// Sends `body` verbatim to the assignment endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseClientError::Http`] on transport failure.
    pub fn assign_raw(&self, body: &str) -> Result<HttpResponse, LicenseClientError> {
        let call = ApiRequest::post(Endpoint::AssignLicense.path()).raw_body(body);
        Ok(self.http.send(&call)?)
    }

    /// Moves licenses to `target`, optionally naming the origin team.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseClientError::Http`] on transport failure.
    pub fn change_team(
        &self,
        license_ids: &[String],
        target: TeamId,
        source: Option<TeamId>,
    ) -> Result<HttpResponse, LicenseClientError> {
        let payload = ChangeTeamRequest::new(license_ids, target, source);
        let body = serde_json::to_value(&payload)
            .map_err(|err| LicenseClientError::Validation(format!("payload encoding: {err}")))?;
        let call = ApiRequest::post(Endpoint::ChangeLicensesTeam.path()).json(body);
        Ok(self.http.send(&call)?)
    }

    /// Lists licenses, optionally filtered by team and assignment state.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseClientError::Http`] on transport failure.
    pub fn list_licenses(
        &self,
        team: Option<TeamId>,
        assigned: Option<bool>,
    ) -> Result<HttpResponse, LicenseClientError> {
        let mut call = ApiRequest::get(Endpoint::Licenses.path());
        if let Some(team) = team {
            call = call.query("teamId", team.to_string());
        }
        if let Some(assigned) = assigned {
            call = call.query("assigned", if assigned { "true" } else { "false" });
        }
        Ok(self.http.send(&call)?)
    }

    /// Revokes a license assignment.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseClientError::Http`] on transport failure.
    pub fn revoke(&self, license_id: &str) -> Result<HttpResponse, LicenseClientError> {
        let call = ApiRequest::post(Endpoint::RevokeLicense.path())
            .json(serde_json::json!({ "licenseId": license_id }));
        Ok(self.http.send(&call)?)
    }

    // ------------------------------------------------------------------------
    // Setup helpers
    // ------------------------------------------------------------------------

    /// Returns ids of licenses available to assign, in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseClientError::Upstream`] on a non-2xx status or an
    /// unparseable body, and [`LicenseClientError::EmptyResult`] when no
    /// license qualifies.
    pub fn available_licenses(&self, team: Option<TeamId>) -> Result<Vec<String>, LicenseClientError> {
        let ids = self.filtered_ids(team, false, LicenseSummary::is_available)?;
        if ids.is_empty() {
            return Err(LicenseClientError::EmptyResult(describe_scope("available", team)));
        }
        Ok(ids)
    }

    /// Returns ids of licenses already assigned, in listing order.
    ///
    /// # Errors
    ///
    /// Same as [`LicenseClient::available_licenses`].
    pub fn assigned_licenses(&self, team: Option<TeamId>) -> Result<Vec<String>, LicenseClientError> {
        let ids = self.filtered_ids(team, true, LicenseSummary::is_assigned)?;
        if ids.is_empty() {
            return Err(LicenseClientError::EmptyResult(describe_scope("assigned", team)));
        }
        Ok(ids)
    }

    /// Returns the first available license id.
    ///
    /// # Errors
    ///
    /// Same as [`LicenseClient::available_licenses`].
    pub fn available_license(&self, team: Option<TeamId>) -> Result<String, LicenseClientError> {
        first(self.available_licenses(team)?, "available", team)
    }

    /// Returns the first assigned license id.
    ///
    /// # Errors
    ///
    /// Same as [`LicenseClient::assigned_licenses`].
    pub fn assigned_license(&self, team: Option<TeamId>) -> Result<String, LicenseClientError> {
        first(self.assigned_licenses(team)?, "assigned", team)
    }

    /// Lists, parses, and filters license ids.
    fn filtered_ids(
        &self,
        team: Option<TeamId>,
        assigned: bool,
        keep: fn(&LicenseSummary) -> bool,
    ) -> Result<Vec<String>, LicenseClientError> {
        let response = self.list_licenses(team, Some(assigned))?;
        if !response.is_success() {
            return Err(LicenseClientError::Upstream(format!(
                "license listing returned status {}",
                response.status()
            )));
        }
        let records: Vec<LicenseSummary> = response.json().map_err(|err| {
            LicenseClientError::Upstream(format!("license listing is not a JSON array: {err}"))
        })?;
        let ids: Vec<String> = records
            .into_iter()
            .filter(|record| keep(record))
            .filter_map(|record| record.license_id)
            .collect();
        debug!(team = team.map(TeamId::get), matched = ids.len(), "filtered license listing");
        Ok(ids)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Describes a helper query scope for error messages.
fn describe_scope(state: &str, team: Option<TeamId>) -> String {
    team.map_or_else(
        || format!("no {state} licenses found"),
        |team| format!("no {state} licenses found in team {team}"),
    )
}

/// Takes the first id or reports an empty result.
fn first(ids: Vec<String>, state: &str, team: Option<TeamId>) -> Result<String, LicenseClientError> {
    ids.into_iter().next().ok_or_else(|| LicenseClientError::EmptyResult(describe_scope(state, team)))
}

