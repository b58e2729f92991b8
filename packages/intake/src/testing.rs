//! Mock registry backend and form fixtures.
//!
//! `MockRegistryApi` records every call with its arguments and can be
//! programmed to fail at a chosen stage, so tests can assert on call order,
//! identifier threading, and failure tagging without a network. Enabled for
//! this crate's own tests and for downstream suites via the `testing` feature.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::BaseRegistryApi;
use crate::form::{FileUpload, FormData};
use crate::pipeline::Stage;
use crate::record::{
    AttachmentBundle, ClientType, EntityKind, InterestId, InterestRecord, ProviderApplication,
    ProviderId,
};

/// Arguments captured from a create-interest call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedInterest {
    pub interest: InterestRecord,
    pub register_as_provider: bool,
}

/// Arguments captured from a create-provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedProvider {
    pub interest_id: InterestId,
    pub provider: ProviderApplication,
}

/// Arguments captured from an upload-attachments call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpload {
    pub provider_id: ProviderId,
    pub attachments: AttachmentBundle,
}

pub struct MockRegistryApi {
    interest_calls: Arc<Mutex<Vec<RecordedInterest>>>,
    provider_calls: Arc<Mutex<Vec<RecordedProvider>>>,
    upload_calls: Arc<Mutex<Vec<RecordedUpload>>>,
    interest_id: String,
    provider_id: String,
    fail_at: Option<(Stage, String)>,
}

impl MockRegistryApi {
    pub fn new() -> Self {
        Self {
            interest_calls: Arc::new(Mutex::new(Vec::new())),
            provider_calls: Arc::new(Mutex::new(Vec::new())),
            upload_calls: Arc::new(Mutex::new(Vec::new())),
            interest_id: "interest-1".to_string(),
            provider_id: "provider-1".to_string(),
            fail_at: None,
        }
    }

    /// Identifier returned by the create-interest call.
    pub fn with_interest_id(mut self, id: &str) -> Self {
        self.interest_id = id.to_string();
        self
    }

    /// Identifier returned by the create-provider call.
    pub fn with_provider_id(mut self, id: &str) -> Self {
        self.provider_id = id.to_string();
        self
    }

    /// Make the call for `stage` fail with `message`. Calls are still
    /// recorded before failing.
    pub fn failing_at(mut self, stage: Stage, message: &str) -> Self {
        self.fail_at = Some((stage, message.to_string()));
        self
    }

    pub fn interest_calls(&self) -> Vec<RecordedInterest> {
        self.interest_calls.lock().unwrap().clone()
    }

    pub fn provider_calls(&self) -> Vec<RecordedProvider> {
        self.provider_calls.lock().unwrap().clone()
    }

    pub fn upload_calls(&self) -> Vec<RecordedUpload> {
        self.upload_calls.lock().unwrap().clone()
    }

    fn check_failure(&self, stage: Stage) -> Result<()> {
        if let Some((fail_stage, message)) = &self.fail_at {
            if *fail_stage == stage {
                bail!("{message}");
            }
        }
        Ok(())
    }
}

impl Default for MockRegistryApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRegistryApi for MockRegistryApi {
    async fn create_interest(
        &self,
        interest: &InterestRecord,
        register_as_provider: bool,
    ) -> Result<InterestId> {
        self.interest_calls.lock().unwrap().push(RecordedInterest {
            interest: interest.clone(),
            register_as_provider,
        });
        self.check_failure(Stage::Base)?;
        Ok(InterestId::new(self.interest_id.clone()))
    }

    async fn create_provider(
        &self,
        interest_id: &InterestId,
        provider: &ProviderApplication,
    ) -> Result<ProviderId> {
        self.provider_calls.lock().unwrap().push(RecordedProvider {
            interest_id: interest_id.clone(),
            provider: provider.clone(),
        });
        self.check_failure(Stage::Provider)?;
        Ok(ProviderId::new(self.provider_id.clone()))
    }

    async fn upload_attachments(
        &self,
        provider_id: &ProviderId,
        attachments: &AttachmentBundle,
    ) -> Result<()> {
        self.upload_calls.lock().unwrap().push(RecordedUpload {
            provider_id: provider_id.clone(),
            attachments: attachments.clone(),
        });
        self.check_failure(Stage::Attachments)?;
        Ok(())
    }
}

/// Fill `data` with the minimal valid interest-only form.
pub fn fill_interest_form(data: &mut FormData) {
    data.contact_email = "a@b.com".into();
    data.entity_kind = Some(EntityKind::Pclbs);
    data.business_plan = "sell widgets".into();
    data.applicant_background = "sole founder".into();
    data.origin_country = "Testland".into();
    data.register_as_provider = false;
}

/// A minimal valid interest-only form.
pub fn valid_interest_form() -> FormData {
    let mut data = FormData::default();
    fill_interest_form(&mut data);
    data
}

/// Fill the provider block of `data` and set the discriminant flag.
pub fn fill_provider_block(data: &mut FormData) {
    data.register_as_provider = true;
    data.contact_name_and_title = "Jo Doe, Director".into();
    data.legal_company_name = "Acme Corporate Services Pte".into();
    data.registration_number = "201912345K".into();
    data.year_established = Some(2015);
    data.website_url = "https://acme.example.com".into();
    data.active_agent_count = Some(4);
    data.experienced_agent_count = Some(2);
    data.years_qualified = Some(6);
    data.license_expiry_date = NaiveDate::from_ymd_opt(2027, 3, 31);
    data.is_licensed_filing_agent = true;
    data.services_offered = "incorporation, registered office".into();
    data.client_types_served.insert(ClientType::LocalCompanies);
    data.security_measures = "encrypted document store".into();
    data.differentiators = "fast turnaround".into();
    data.regulatory_notice = Some(FileUpload::new(
        "acra-notice.pdf",
        "application/pdf",
        b"notice".to_vec(),
    ));
    data.company_profile = Some(FileUpload::new(
        "profile.pdf",
        "application/pdf",
        b"profile".to_vec(),
    ));
    data.fee_schedule = Some(FileUpload::new(
        "fees.pdf",
        "application/pdf",
        b"fees".to_vec(),
    ));
}

/// A fully valid form that also registers as a provider.
pub fn provider_form() -> FormData {
    let mut data = valid_interest_form();
    fill_provider_block(&mut data);
    data
}
