//! AdminApi - Reporting Platform REST Client
//!
//! Typed request/response payloads for the platform's admin endpoints and
//! a thin reqwest client over them. Payload shapes follow the backend's
//! camelCase JSON contract; responses are validated at this boundary and
//! never reach the UI untyped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::capability::Capability;
use crate::domain::config::ApiConfig;
use crate::domain::profile::{CohortRef, Profile, ProfileSetting, TestRef, VisitRef};
use crate::domain::protocol::Protocol;
use crate::domain::user::AssociatedUser;
use crate::error::{Error, Result};

// ---- shared payloads -------------------------------------------------------

/// Paged list request for the simple list endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
}

/// Paged list response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: usize,
}

/// Write-operation result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ---- protocol endpoints ----------------------------------------------------

/// Associated-user listing request (column filters + sort + page)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
    pub sort_field: String,
    /// 0 unsorted / 1 descending / 2 ascending
    pub sort_type: u8,
    pub page_number: u32,
    pub page_size: u32,
}

/// Associated-user listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolDetailResponse {
    #[serde(default = "Vec::new")]
    pub items: Vec<AssociatedUser>,
    #[serde(default)]
    pub filtered_total_count: usize,
    #[serde(default)]
    pub protocol: Option<Protocol>,
}

// ---- profile endpoints -----------------------------------------------------

/// Report-profile listing request (lazy list in the profiles page)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePageQuery {
    pub page: u32,
    pub page_size: u32,
    pub protocol_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
}

/// Versioned test reference in a detail filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestFilterRef {
    pub study_test_id: String,
    pub version_number: u32,
}

/// Versioned cohort reference in a detail filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CohortFilterRef {
    pub cohort_id: String,
    pub version_number: u32,
}

/// Versioned visit reference in a detail filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitFilterRef {
    pub visit_id: String,
    pub version_number: u32,
}

/// Blind/hide profile-setting listing request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetailQuery {
    pub study_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_test_ids: Option<Vec<TestFilterRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohort_ids: Option<Vec<CohortFilterRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_ids: Option<Vec<VisitFilterRef>>,
    /// "B" / "H" wire codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blind_or_hide: Option<String>,
    #[serde(default)]
    pub search_value: String,
    pub sort_field: String,
    /// 0 unsorted / 1 descending / 2 ascending
    pub sort_direction: u8,
    pub current_page: u32,
    pub page_size: u32,
}

/// Filter-dropdown option sets for a protocol or profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFilterOptions {
    #[serde(default)]
    pub study_id: Option<String>,
    #[serde(default = "Vec::new")]
    pub tests: Vec<TestRef>,
    #[serde(default = "Vec::new")]
    pub cohorts: Vec<CohortRef>,
    #[serde(default = "Vec::new")]
    pub visits: Vec<VisitRef>,
}

/// Profile-setting update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileSettingRequest {
    pub profile_id: String,
    pub test_ids: Vec<String>,
    pub cohort_id: String,
    pub visit_ids: Vec<String>,
    /// "B" / "H"
    pub blind_or_hide: String,
}

/// New report profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProfileRequest {
    pub profile_name: String,
    pub protocol_id: String,
}

/// Bulk profile removal payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteProfilesRequest {
    pub profile_ids: Vec<String>,
}

/// Blind/hide configuration removal payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProfileSettingsRequest {
    pub profile_setting_ids: Vec<String>,
    pub is_delete_all: bool,
}

/// Tests grouped by cohort, for the cross-entity validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortTests {
    pub cohort_id: String,
    #[serde(default = "Vec::new")]
    pub tests: Vec<TestRef>,
}

/// Cohort-tests mapping response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortTestsResponse {
    #[serde(default = "Vec::new")]
    pub cohorts: Vec<CohortTests>,
}

// ---- capability endpoints --------------------------------------------------

/// Capability listing request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort_field: String,
    /// 0 unsorted / 1 descending / 2 ascending
    pub sort_type: u8,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub capability_name: String,
}

/// Capability listing response (items nested under `data`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityListResponse {
    pub data: PageResponse<Capability>,
}

/// Registration-email payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationEmailRequest {
    pub resend: bool,
}

// ---- client ----------------------------------------------------------------

/// REST client for the reporting platform admin API
#[derive(Debug, Clone)]
pub struct AdminApi {
    client: reqwest::Client,
    base_url: String,
}

impl AdminApi {
    /// Build a client from config; `token` is the decrypted bearer token
    pub fn new(config: &ApiConfig, token: Option<&str>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::Invalid {
                    message: format!("Invalid API token: {e}"),
                })?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    // ---- protocols --------------------------------------------------------

    /// Activated protocols, paged and searchable by study code
    pub async fn activated_protocols(&self, query: &PageQuery) -> Result<PageResponse<Protocol>> {
        self.post_json("protocols/activated/search", query).await
    }

    /// Users associated with a protocol
    pub async fn protocol_users(
        &self,
        protocol_id: &str,
        query: &UserDetailQuery,
    ) -> Result<ProtocolDetailResponse> {
        self.post_json(&format!("protocols/{protocol_id}/users/search"), query)
            .await
    }

    pub async fn protocol_regions(&self, protocol_id: &str) -> Result<Vec<String>> {
        self.get_json(&format!("protocols/{protocol_id}/regions")).await
    }

    pub async fn protocol_countries(&self, protocol_id: &str) -> Result<Vec<String>> {
        self.get_json(&format!("protocols/{protocol_id}/countries")).await
    }

    pub async fn protocol_sites(&self, protocol_id: &str) -> Result<Vec<String>> {
        self.get_json(&format!("protocols/{protocol_id}/sites")).await
    }

    /// Registration email for every user of a protocol
    pub async fn send_registration_email(
        &self,
        protocol_id: &str,
        resend: bool,
    ) -> Result<MutationResponse> {
        self.post_json(
            &format!("protocols/{protocol_id}/registration-email"),
            &RegistrationEmailRequest { resend },
        )
        .await
    }

    // ---- profiles ---------------------------------------------------------

    /// Report profiles of a protocol, paged
    pub async fn report_profiles(&self, query: &ProfilePageQuery) -> Result<PageResponse<Profile>> {
        self.post_json("profiles/search", query).await
    }

    /// Filter-dropdown options scoped to a protocol
    pub async fn protocol_filter_options(&self, protocol_id: &str) -> Result<ProfileFilterOptions> {
        self.get_json(&format!("protocols/{protocol_id}/profile-filters")).await
    }

    /// Filter-dropdown options scoped to a profile
    pub async fn profile_filter_options(&self, profile_id: &str) -> Result<ProfileFilterOptions> {
        self.get_json(&format!("profiles/{profile_id}/filters")).await
    }

    /// Blind/hide settings of a protocol's profile, filtered and paged
    pub async fn profile_detail(
        &self,
        protocol_id: &str,
        query: &ProfileDetailQuery,
    ) -> Result<PageResponse<ProfileSetting>> {
        self.post_json(
            &format!("protocols/{protocol_id}/profile-settings/search"),
            query,
        )
        .await
    }

    pub async fn update_profile_setting(
        &self,
        setting_id: &str,
        request: &UpdateProfileSettingRequest,
    ) -> Result<MutationResponse> {
        self.put_json(&format!("profile-settings/{setting_id}"), request).await
    }

    pub async fn add_report_profile(&self, request: &AddProfileRequest) -> Result<MutationResponse> {
        self.post_json("profiles", request).await
    }

    pub async fn bulk_delete_profiles(
        &self,
        request: &BulkDeleteProfilesRequest,
    ) -> Result<MutationResponse> {
        self.post_json("profiles/bulk-delete", request).await
    }

    pub async fn delete_profile_settings(
        &self,
        request: &DeleteProfileSettingsRequest,
    ) -> Result<MutationResponse> {
        self.post_json("profile-settings/delete", request).await
    }

    /// Tests grouped by cohort for a profile
    pub async fn tests_and_cohorts(&self, profile_id: &str) -> Result<CohortTestsResponse> {
        self.get_json(&format!("profiles/{profile_id}/cohort-tests")).await
    }

    // ---- capabilities -----------------------------------------------------

    pub async fn capabilities(&self, query: &CapabilityQuery) -> Result<CapabilityListResponse> {
        self.post_json("capabilities/search", query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_omits_empty_search() {
        let query = PageQuery {
            page: 1,
            page_size: 40,
            search_fields: None,
            search_value: None,
        };
        let json = serde_json::to_value(&query).expect("encode");
        assert_eq!(json["page"], 1);
        assert_eq!(json["pageSize"], 40);
        assert!(json.get("searchValue").is_none());
    }

    #[test]
    fn test_detail_query_serializes_versioned_refs() {
        let query = ProfileDetailQuery {
            study_id: "S1".to_string(),
            profile_id: Some("P1".to_string()),
            study_test_ids: Some(vec![TestFilterRef {
                study_test_id: "T1".to_string(),
                version_number: 2,
            }]),
            cohort_ids: None,
            visit_ids: None,
            blind_or_hide: Some("B".to_string()),
            search_value: String::new(),
            sort_field: "Tests".to_string(),
            sort_direction: 2,
            current_page: 1,
            page_size: 20,
        };
        let json = serde_json::to_value(&query).expect("encode");
        assert_eq!(json["studyTestIds"][0]["studyTestId"], "T1");
        assert_eq!(json["studyTestIds"][0]["versionNumber"], 2);
        assert!(json.get("cohortIds").is_none());
        assert_eq!(json["sortDirection"], 2);
    }

    #[test]
    fn test_page_response_tolerates_missing_fields() {
        let decoded: PageResponse<Profile> = serde_json::from_str("{}").expect("decode");
        assert!(decoded.items.is_empty());
        assert_eq!(decoded.total_count, 0);
    }

    #[test]
    fn test_capability_response_nests_under_data() {
        let raw = r#"{"data": {"items": [{"capabilityId": "c1", "capabilityName": "Reports", "url": "/reports"}], "totalCount": 1}}"#;
        let decoded: CapabilityListResponse = serde_json::from_str(raw).expect("decode");
        assert_eq!(decoded.data.items[0].capability_name, "Reports");
        assert_eq!(decoded.data.total_count, 1);
    }

    #[test]
    fn test_base_url_joining() {
        let api = AdminApi::new(
            &ApiConfig {
                base_url: "https://api.example.com/v1/".to_string(),
                encrypted_token: None,
                timeout_secs: 5,
            },
            None,
        )
        .expect("client");
        assert_eq!(api.url("/profiles"), "https://api.example.com/v1/profiles");
        assert_eq!(api.url("profiles"), "https://api.example.com/v1/profiles");
    }
}
