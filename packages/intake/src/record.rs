//! Validated domain records.
//!
//! These types exist only on the far side of validation: a [`Submission`] can
//! be constructed solely by [`crate::validation::validate`], so "provider flag
//! set but provider fields missing" is unrepresentable here. Raw, possibly
//! invalid input lives in [`crate::form::FormData`].

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::form::FileUpload;

/// Opaque identifier assigned by the registry to an interest record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterestId(String);

impl InterestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier assigned by the registry to a provider registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of business entity the submitter intends to form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Pclbs,
    BranchOffice,
}

impl EntityKind {
    /// Value the registry expects on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            EntityKind::Pclbs => "PCLBS",
            EntityKind::BranchOffice => "BRANCH_OFFICE",
        }
    }
}

/// Fixed enumeration of client categories a provider may serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClientType {
    LocalCompanies,
    ForeignCompanies,
    Individuals,
    Trusts,
    Partnerships,
}

impl ClientType {
    pub fn wire_name(self) -> &'static str {
        match self {
            ClientType::LocalCompanies => "LOCAL_COMPANIES",
            ClientType::ForeignCompanies => "FOREIGN_COMPANIES",
            ClientType::Individuals => "INDIVIDUALS",
            ClientType::Trusts => "TRUSTS",
            ClientType::Partnerships => "PARTNERSHIPS",
        }
    }
}

/// The always-created registration of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestRecord {
    pub contact_email: String,
    pub entity_kind: EntityKind,
    pub business_plan: String,
    pub applicant_background: String,
    pub origin_country: String,
    pub online_presence: Option<String>,
}

/// The conditionally-created corporate service provider registration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderApplication {
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
    pub client_types_served: BTreeSet<ClientType>,
    pub security_measures: String,
    pub differentiators: String,
    pub additional_info: Option<String>,
    pub questions: Option<String>,
}

/// The supporting documents uploaded against a provider registration.
///
/// Both required slots hold exactly one file; the company profile is the
/// only optional slot.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentBundle {
    pub regulatory_notice: FileUpload,
    pub company_profile: Option<FileUpload>,
    pub fee_schedule: FileUpload,
}

/// A fully validated submission, tagged by what the pipeline must create.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Base registration only; the pipeline ends after one remote call.
    InterestOnly(InterestRecord),
    /// Base registration plus provider registration plus attachments.
    WithProvider {
        interest: InterestRecord,
        provider: ProviderApplication,
        attachments: AttachmentBundle,
    },
}

impl Submission {
    pub fn interest(&self) -> &InterestRecord {
        match self {
            Submission::InterestOnly(interest) => interest,
            Submission::WithProvider { interest, .. } => interest,
        }
    }

    pub fn registers_as_provider(&self) -> bool {
        matches!(self, Submission::WithProvider { .. })
    }
}

/// Identifiers created by a successful pipeline run, for acknowledgement
/// display. `provider_id` is present iff the submission registered as a
/// provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub interest_id: InterestId,
    pub provider_id: Option<ProviderId>,
}
