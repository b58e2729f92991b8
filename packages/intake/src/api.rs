//! Trait boundary for the registry backend.
//!
//! These are infrastructure seams only; the pipeline logic lives in
//! [`crate::pipeline`]. `BaseRegistryApi` is what the orchestrator calls,
//! `RegistryApi` is the production implementation wrapping the pure
//! `registry-client` crate, and the mock lives in [`crate::testing`].

use anyhow::Result;
use async_trait::async_trait;

use registry_client::{
    AttachmentParts, FilePart, InterestRequest, ProviderRequest, RegistryClient,
};

use crate::form::FileUpload;
use crate::record::{
    AttachmentBundle, InterestId, InterestRecord, ProviderApplication, ProviderId,
};

/// The three remote operations of the submission pipeline.
///
/// Implementations must not retry internally; the orchestrator treats every
/// error as a terminal stage failure.
#[async_trait]
pub trait BaseRegistryApi: Send + Sync {
    /// Create the registration of interest. The discriminant flag travels on
    /// this payload, not as a separate call.
    async fn create_interest(
        &self,
        interest: &InterestRecord,
        register_as_provider: bool,
    ) -> Result<InterestId>;

    /// Create the provider registration referencing an existing interest.
    async fn create_provider(
        &self,
        interest_id: &InterestId,
        provider: &ProviderApplication,
    ) -> Result<ProviderId>;

    /// Upload the attachment bundle against an existing provider registration.
    async fn upload_attachments(
        &self,
        provider_id: &ProviderId,
        attachments: &AttachmentBundle,
    ) -> Result<()>;
}

/// Production implementation backed by [`RegistryClient`].
pub struct RegistryApi {
    client: RegistryClient,
}

impl RegistryApi {
    pub fn new(base_url: String) -> Self {
        Self {
            client: RegistryClient::new(base_url),
        }
    }

    pub fn with_client(client: RegistryClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseRegistryApi for RegistryApi {
    async fn create_interest(
        &self,
        interest: &InterestRecord,
        register_as_provider: bool,
    ) -> Result<InterestId> {
        let request = InterestRequest {
            contact_email: interest.contact_email.clone(),
            entity_kind: interest.entity_kind.wire_name().to_string(),
            business_plan: interest.business_plan.clone(),
            applicant_background: interest.applicant_background.clone(),
            origin_country: interest.origin_country.clone(),
            online_presence: interest.online_presence.clone(),
            register_as_provider,
        };
        let created = self.client.create_interest(&request).await?;
        Ok(InterestId::new(created.id))
    }

    async fn create_provider(
        &self,
        interest_id: &InterestId,
        provider: &ProviderApplication,
    ) -> Result<ProviderId> {
        let request = ProviderRequest {
            interest_id: interest_id.as_str().to_string(),
            contact_name_and_title: provider.contact_name_and_title.clone(),
            legal_company_name: provider.legal_company_name.clone(),
            registration_number: provider.registration_number.clone(),
            year_established: provider.year_established,
            website_url: provider.website_url.clone(),
            active_agent_count: provider.active_agent_count,
            experienced_agent_count: provider.experienced_agent_count,
            years_qualified: provider.years_qualified,
            license_expiry_date: provider.license_expiry_date,
            is_licensed_filing_agent: provider.is_licensed_filing_agent,
            services_offered: provider.services_offered.clone(),
            client_types_served: provider
                .client_types_served
                .iter()
                .map(|client_type| client_type.wire_name().to_string())
                .collect(),
            security_measures: provider.security_measures.clone(),
            differentiators: provider.differentiators.clone(),
            additional_info: provider.additional_info.clone(),
            questions: provider.questions.clone(),
        };
        let created = self.client.create_provider(&request).await?;
        Ok(ProviderId::new(created.id))
    }

    async fn upload_attachments(
        &self,
        provider_id: &ProviderId,
        attachments: &AttachmentBundle,
    ) -> Result<()> {
        let parts = AttachmentParts {
            acra: to_file_part(&attachments.regulatory_notice),
            company_profile: attachments.company_profile.as_ref().map(to_file_part),
            current_fee_schedule: to_file_part(&attachments.fee_schedule),
        };
        self.client
            .upload_attachments(provider_id.as_str(), &parts)
            .await?;
        Ok(())
    }
}

fn to_file_part(file: &FileUpload) -> FilePart {
    FilePart {
        file_name: file.file_name.clone(),
        content_type: file.content_type.clone(),
        bytes: file.bytes.clone(),
    }
}
