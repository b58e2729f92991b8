use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request body for creating a registration of interest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRequest {
    pub contact_email: String,
    /// Wire values: `PCLBS` or `BRANCH_OFFICE`.
    pub entity_kind: String,
    pub business_plan: String,
    pub applicant_background: String,
    pub origin_country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_presence: Option<String>,
    pub register_as_provider: bool,
}

/// Request body for creating a corporate service provider registration.
///
/// `interest_id` must be the identifier returned by the create-interest call;
/// the registry rejects provider registrations that reference nothing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    pub interest_id: String,
    pub contact_name_and_title: String,
    pub legal_company_name: String,
    pub registration_number: String,
    pub year_established: i32,
    pub website_url: String,
    pub active_agent_count: u32,
    pub experienced_agent_count: u32,
    pub years_qualified: u32,
    pub license_expiry_date: NaiveDate,
    pub is_licensed_filing_agent: bool,
    pub services_offered: String,
    pub client_types_served: Vec<String>,
    pub security_measures: String,
    pub differentiators: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<String>,
}

/// A single file destined for one named part of the attachment upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The attachment bundle uploaded in one multipart request.
///
/// Part names on the wire are `acra`, `companyProfile` and
/// `currentFeeSchedule`; `company_profile` is the only optional slot.
#[derive(Debug, Clone)]
pub struct AttachmentParts {
    pub acra: FilePart,
    pub company_profile: Option<FilePart>,
    pub current_fee_schedule: FilePart,
}

/// Minimal create response: the registry assigns opaque identifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}
