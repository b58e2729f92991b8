//! Raw form input.
//!
//! `FormData` is what the presentation layer mutates field by field. Every
//! field is freely editable and possibly invalid; validation turns the whole
//! struct into a typed [`Submission`](crate::record::Submission) or a per-field
//! error map. Text fields use the empty string for "not entered" so a UI can
//! bind them directly to inputs.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::record::{ClientType, EntityKind};

/// A file picked by the submitter for one attachment slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Current values of every field on the intake form.
///
/// The provider block below `register_as_provider` is always present and
/// editable; whether it participates in validation is decided solely by that
/// flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    // Base registration of interest.
    pub contact_email: String,
    pub entity_kind: Option<EntityKind>,
    pub business_plan: String,
    pub applicant_background: String,
    pub origin_country: String,
    /// Optional; empty string means not provided.
    pub online_presence: String,
    /// Discriminant: when false the provider block is ignored entirely.
    pub register_as_provider: bool,

    // Provider registration block.
    pub contact_name_and_title: String,
    pub legal_company_name: String,
    pub registration_number: String,
    pub year_established: Option<i32>,
    pub website_url: String,
    pub active_agent_count: Option<u32>,
    pub experienced_agent_count: Option<u32>,
    pub years_qualified: Option<u32>,
    pub license_expiry_date: Option<NaiveDate>,
    pub is_licensed_filing_agent: bool,
    pub services_offered: String,
    pub client_types_served: BTreeSet<ClientType>,
    pub security_measures: String,
    pub differentiators: String,
    pub additional_info: String,
    pub questions: String,

    // Attachment slots.
    pub regulatory_notice: Option<FileUpload>,
    pub company_profile: Option<FileUpload>,
    pub fee_schedule: Option<FileUpload>,
}
