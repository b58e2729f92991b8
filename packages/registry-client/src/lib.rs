//! Pure REST client for the entity formation registry.
//!
//! Covers the three remote operations of the intake pipeline: creating a
//! registration of interest, creating a corporate service provider
//! registration against it, and uploading the provider's supporting
//! documents as one multipart bundle.
//!
//! # Example
//!
//! ```rust,ignore
//! use registry_client::{RegistryClient, InterestRequest};
//!
//! let client = RegistryClient::new("https://registry.example.gov/api".into());
//!
//! let created = client.create_interest(&request).await?;
//! println!("interest id: {}", created.id);
//! ```

pub mod error;
pub mod types;

pub use error::{RegistryError, Result};
pub use types::{AttachmentParts, CreatedResponse, FilePart, InterestRequest, ProviderRequest};

use reqwest::multipart::{Form, Part};

pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Build against an injected `reqwest::Client`, e.g. one carrying a
    /// caller-chosen timeout. Trailing slashes on the base URL are tolerated.
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a registration of interest. Returns the registry-assigned id.
    pub async fn create_interest(&self, request: &InterestRequest) -> Result<CreatedResponse> {
        let url = format!("{}/interests", self.base_url);
        let resp = self.client.post(&url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::api(status.as_u16(), body));
        }

        let created: CreatedResponse = resp.json().await?;
        tracing::info!(interest_id = %created.id, "Interest registration created");
        Ok(created)
    }

    /// Create a provider registration referencing an existing interest.
    pub async fn create_provider(&self, request: &ProviderRequest) -> Result<CreatedResponse> {
        let url = format!("{}/providers", self.base_url);
        let resp = self.client.post(&url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::api(status.as_u16(), body));
        }

        let created: CreatedResponse = resp.json().await?;
        tracing::info!(
            provider_id = %created.id,
            interest_id = %request.interest_id,
            "Provider registration created"
        );
        Ok(created)
    }

    /// Upload the attachment bundle for a provider registration.
    ///
    /// All slots travel in a single multipart request; the response body is
    /// an acknowledgement only and is discarded.
    pub async fn upload_attachments(
        &self,
        provider_id: &str,
        attachments: &AttachmentParts,
    ) -> Result<()> {
        let url = format!("{}/providers/{}/attachments", self.base_url, provider_id);

        let mut form = Form::new()
            .part("acra", to_part(&attachments.acra)?)
            .part(
                "currentFeeSchedule",
                to_part(&attachments.current_fee_schedule)?,
            );
        if let Some(profile) = &attachments.company_profile {
            form = form.part("companyProfile", to_part(profile)?);
        }

        let resp = self.client.post(&url).multipart(form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::api(status.as_u16(), body));
        }

        tracing::info!(provider_id, "Attachments uploaded");
        Ok(())
    }
}

fn to_part(file: &FilePart) -> Result<Part> {
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)?;
    Ok(part)
}
