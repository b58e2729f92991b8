//! The conditional validation schema.
//!
//! [`validate`] is synchronous and total: it evaluates every rule on every
//! call, so a session can re-run it after each field change and the submit
//! affordance never reflects stale validity. The provider block participates
//! only when `register_as_provider` is set; when it is not, provider fields
//! are ignored outright rather than treated as optional.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use url::Url;

use crate::form::FormData;
use crate::record::{
    AttachmentBundle, InterestRecord, ProviderApplication, Submission,
};

/// Field keys used in error maps. These match the form's wire names so a
/// presentation layer can attach messages to inputs without a translation
/// table.
pub mod fields {
    pub const CONTACT_EMAIL: &str = "contactEmail";
    pub const ENTITY_KIND: &str = "entityKind";
    pub const BUSINESS_PLAN: &str = "businessPlan";
    pub const APPLICANT_BACKGROUND: &str = "applicantBackground";
    pub const ORIGIN_COUNTRY: &str = "originCountry";
    pub const ONLINE_PRESENCE: &str = "onlinePresence";

    pub const CONTACT_NAME_AND_TITLE: &str = "contactNameAndTitle";
    pub const LEGAL_COMPANY_NAME: &str = "legalCompanyName";
    pub const REGISTRATION_NUMBER: &str = "registrationNumber";
    pub const YEAR_ESTABLISHED: &str = "yearEstablished";
    pub const WEBSITE_URL: &str = "websiteUrl";
    pub const ACTIVE_AGENT_COUNT: &str = "activeAgentCount";
    pub const EXPERIENCED_AGENT_COUNT: &str = "experiencedAgentCount";
    pub const YEARS_QUALIFIED: &str = "yearsQualified";
    pub const LICENSE_EXPIRY_DATE: &str = "licenseExpiryDate";
    pub const SERVICES_OFFERED: &str = "servicesOffered";
    pub const CLIENT_TYPES_SERVED: &str = "clientTypesServed";
    pub const SECURITY_MEASURES: &str = "securityMeasures";
    pub const DIFFERENTIATORS: &str = "differentiators";

    pub const REGULATORY_NOTICE: &str = "regulatoryNotice";
    pub const COMPANY_PROFILE: &str = "companyProfile";
    pub const FEE_SCHEDULE: &str = "feeSchedule";
}

/// One human-readable message per invalid field, in deterministic order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

/// Evaluate the full schema against raw input.
///
/// Returns a typed [`Submission`] when every applicable rule passes, or the
/// complete per-field error map otherwise. Base rules always apply; provider
/// rules apply iff `register_as_provider` is set.
pub fn validate(data: &FormData) -> Result<Submission, FieldErrors> {
    let mut errors = FieldErrors::default();

    // Base block.
    if !is_valid_email(data.contact_email.trim()) {
        errors.insert(fields::CONTACT_EMAIL, "Enter a valid email address");
    }
    if data.entity_kind.is_none() {
        errors.insert(fields::ENTITY_KIND, "Select the kind of entity to form");
    }
    require_text(&mut errors, fields::BUSINESS_PLAN, &data.business_plan, "Describe the business plan");
    require_text(
        &mut errors,
        fields::APPLICANT_BACKGROUND,
        &data.applicant_background,
        "Describe the applicant's background",
    );
    require_text(
        &mut errors,
        fields::ORIGIN_COUNTRY,
        &data.origin_country,
        "Enter the country of origin",
    );

    let online_presence = data.online_presence.trim();
    if !online_presence.is_empty()
        && !(online_presence.starts_with("http://") || online_presence.starts_with("https://"))
    {
        errors.insert(
            fields::ONLINE_PRESENCE,
            "Online presence must start with http:// or https://",
        );
    }

    if !data.register_as_provider {
        if !errors.is_empty() {
            return Err(errors);
        }
        if let Some(entity_kind) = data.entity_kind {
            return Ok(Submission::InterestOnly(build_interest(data, entity_kind)));
        }
        return Err(errors);
    }

    // Provider block: every required field checked independently.
    require_text(
        &mut errors,
        fields::CONTACT_NAME_AND_TITLE,
        &data.contact_name_and_title,
        "Enter the contact person's name and title",
    );
    require_text(
        &mut errors,
        fields::LEGAL_COMPANY_NAME,
        &data.legal_company_name,
        "Enter the legal company name",
    );
    require_text(
        &mut errors,
        fields::REGISTRATION_NUMBER,
        &data.registration_number,
        "Enter the company registration number",
    );

    let current_year = Utc::now().year();
    match data.year_established {
        None => errors.insert(fields::YEAR_ESTABLISHED, "Enter the year of establishment"),
        Some(year) if year < 1900 || year > current_year => errors.insert(
            fields::YEAR_ESTABLISHED,
            format!("Year of establishment must be between 1900 and {current_year}"),
        ),
        Some(_) => {}
    }

    if !is_absolute_http_url(data.website_url.trim()) {
        errors.insert(fields::WEBSITE_URL, "Enter a valid website URL");
    }

    if data.active_agent_count.is_none() {
        errors.insert(fields::ACTIVE_AGENT_COUNT, "Enter the number of active agents");
    }
    if data.experienced_agent_count.is_none() {
        errors.insert(
            fields::EXPERIENCED_AGENT_COUNT,
            "Enter the number of experienced agents",
        );
    }
    if data.years_qualified.is_none() {
        errors.insert(fields::YEARS_QUALIFIED, "Enter the years of relevant qualification");
    }
    if data.license_expiry_date.is_none() {
        errors.insert(fields::LICENSE_EXPIRY_DATE, "Enter the license expiry date");
    }

    require_text(
        &mut errors,
        fields::SERVICES_OFFERED,
        &data.services_offered,
        "Describe the services offered",
    );
    if data.client_types_served.is_empty() {
        errors.insert(fields::CLIENT_TYPES_SERVED, "Select at least one client type");
    }
    require_text(
        &mut errors,
        fields::SECURITY_MEASURES,
        &data.security_measures,
        "Describe the security measures in place",
    );
    require_text(
        &mut errors,
        fields::DIFFERENTIATORS,
        &data.differentiators,
        "Describe what differentiates the company",
    );

    // Required slots validate presence only; the optional profile validates
    // shape only when a file was actually attached.
    if data.regulatory_notice.is_none() {
        errors.insert(fields::REGULATORY_NOTICE, "Attach the regulatory notice");
    }
    if data.fee_schedule.is_none() {
        errors.insert(fields::FEE_SCHEDULE, "Attach the current fee schedule");
    }
    if let Some(profile) = &data.company_profile {
        if profile.file_name.trim().is_empty() || profile.bytes.is_empty() {
            errors.insert(fields::COMPANY_PROFILE, "Attached company profile is empty");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Reaching here means every check above recorded no error, so each of
    // these options is necessarily populated.
    if let (
        Some(entity_kind),
        Some(year_established),
        Some(active_agent_count),
        Some(experienced_agent_count),
        Some(years_qualified),
        Some(license_expiry_date),
        Some(regulatory_notice),
        Some(fee_schedule),
    ) = (
        data.entity_kind,
        data.year_established,
        data.active_agent_count,
        data.experienced_agent_count,
        data.years_qualified,
        data.license_expiry_date,
        data.regulatory_notice.clone(),
        data.fee_schedule.clone(),
    ) {
        let provider = ProviderApplication {
            contact_name_and_title: data.contact_name_and_title.trim().to_string(),
            legal_company_name: data.legal_company_name.trim().to_string(),
            registration_number: data.registration_number.trim().to_string(),
            year_established,
            website_url: data.website_url.trim().to_string(),
            active_agent_count,
            experienced_agent_count,
            years_qualified,
            license_expiry_date,
            is_licensed_filing_agent: data.is_licensed_filing_agent,
            services_offered: data.services_offered.trim().to_string(),
            client_types_served: data.client_types_served.clone(),
            security_measures: data.security_measures.trim().to_string(),
            differentiators: data.differentiators.trim().to_string(),
            additional_info: optional_text(&data.additional_info),
            questions: optional_text(&data.questions),
        };
        let attachments = AttachmentBundle {
            regulatory_notice,
            company_profile: data.company_profile.clone(),
            fee_schedule,
        };
        return Ok(Submission::WithProvider {
            interest: build_interest(data, entity_kind),
            provider,
            attachments,
        });
    }

    Err(errors)
}

fn build_interest(data: &FormData, entity_kind: crate::record::EntityKind) -> InterestRecord {
    InterestRecord {
        contact_email: data.contact_email.trim().to_string(),
        entity_kind,
        business_plan: data.business_plan.trim().to_string(),
        applicant_background: data.applicant_background.trim().to_string(),
        origin_country: data.origin_country.trim().to_string(),
        online_presence: optional_text(&data.online_presence),
    }
}

fn require_text(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Structural email check: exactly one `@`, non-empty local part, and a
/// dotted domain without whitespace.
fn is_valid_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
        && !domain.contains('@')
}

fn is_absolute_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ClientType, EntityKind};
    use crate::testing::{provider_form, valid_interest_form};

    #[test]
    fn valid_interest_only_form_produces_interest_only_submission() {
        let data = valid_interest_form();
        let submission = validate(&data).expect("form should validate");
        match submission {
            Submission::InterestOnly(interest) => {
                assert_eq!(interest.contact_email, "a@b.com");
                assert_eq!(interest.entity_kind, EntityKind::Pclbs);
                assert_eq!(interest.business_plan, "sell widgets");
                assert_eq!(interest.online_presence, None);
            }
            other => panic!("expected InterestOnly, got {other:?}"),
        }
    }

    #[test]
    fn base_fields_are_each_required() {
        let mut data = valid_interest_form();
        data.contact_email = "not-an-email".into();
        data.business_plan = "   ".into();
        data.entity_kind = None;

        let errors = validate(&data).unwrap_err();
        assert!(errors.contains(fields::CONTACT_EMAIL));
        assert!(errors.contains(fields::BUSINESS_PLAN));
        assert!(errors.contains(fields::ENTITY_KIND));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn online_presence_is_optional_but_must_be_http_when_present() {
        let mut data = valid_interest_form();
        data.online_presence = "ftp://example.com".into();
        let errors = validate(&data).unwrap_err();
        assert!(errors.contains(fields::ONLINE_PRESENCE));

        data.online_presence = "https://example.com".into();
        let submission = validate(&data).expect("https URL should pass");
        assert_eq!(
            submission.interest().online_presence.as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn provider_fields_are_ignored_when_flag_is_off() {
        let mut data = valid_interest_form();
        // Garbage in the provider block must not affect validity.
        data.year_established = Some(1800);
        data.website_url = "not a url".into();
        data.legal_company_name = String::new();

        let submission = validate(&data).expect("provider block must be ignored");
        assert!(!submission.registers_as_provider());
    }

    #[test]
    fn provider_flag_requires_every_provider_field() {
        let mut data = valid_interest_form();
        data.register_as_provider = true;

        let errors = validate(&data).unwrap_err();
        for field in [
            fields::CONTACT_NAME_AND_TITLE,
            fields::LEGAL_COMPANY_NAME,
            fields::REGISTRATION_NUMBER,
            fields::YEAR_ESTABLISHED,
            fields::WEBSITE_URL,
            fields::ACTIVE_AGENT_COUNT,
            fields::EXPERIENCED_AGENT_COUNT,
            fields::YEARS_QUALIFIED,
            fields::LICENSE_EXPIRY_DATE,
            fields::SERVICES_OFFERED,
            fields::CLIENT_TYPES_SERVED,
            fields::SECURITY_MEASURES,
            fields::DIFFERENTIATORS,
            fields::REGULATORY_NOTICE,
            fields::FEE_SCHEDULE,
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn year_established_1800_is_rejected() {
        let mut data = provider_form();
        data.year_established = Some(1800);
        let errors = validate(&data).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(fields::YEAR_ESTABLISHED));
    }

    #[test]
    fn year_established_accepts_bounds() {
        let mut data = provider_form();
        data.year_established = Some(1900);
        assert!(validate(&data).is_ok());

        let current_year = chrono::Utc::now().year();
        data.year_established = Some(current_year);
        assert!(validate(&data).is_ok());

        data.year_established = Some(current_year + 1);
        assert!(validate(&data).unwrap_err().contains(fields::YEAR_ESTABLISHED));
    }

    #[test]
    fn website_url_must_be_absolute() {
        let mut data = provider_form();
        data.website_url = "acme.example.com".into();
        assert!(validate(&data).unwrap_err().contains(fields::WEBSITE_URL));

        data.website_url = "mailto:someone@example.com".into();
        assert!(validate(&data).unwrap_err().contains(fields::WEBSITE_URL));

        data.website_url = "http://acme.example.com".into();
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn client_types_set_must_be_non_empty() {
        let mut data = provider_form();
        data.client_types_served.clear();
        assert!(validate(&data)
            .unwrap_err()
            .contains(fields::CLIENT_TYPES_SERVED));

        data.client_types_served.insert(ClientType::Trusts);
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn required_slots_check_presence_and_profile_checks_shape_only() {
        let mut data = provider_form();
        data.regulatory_notice = None;
        let errors = validate(&data).unwrap_err();
        assert!(errors.contains(fields::REGULATORY_NOTICE));
        assert!(!errors.contains(fields::COMPANY_PROFILE));

        let mut data = provider_form();
        data.company_profile = Some(crate::form::FileUpload::new("", "application/pdf", vec![]));
        assert!(validate(&data)
            .unwrap_err()
            .contains(fields::COMPANY_PROFILE));

        // Absent profile is never an error.
        let mut data = provider_form();
        data.company_profile = None;
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn valid_provider_form_builds_tagged_submission() {
        let data = provider_form();
        let submission = validate(&data).expect("provider form should validate");
        match submission {
            Submission::WithProvider {
                interest,
                provider,
                attachments,
            } => {
                assert_eq!(interest.origin_country, "Testland");
                assert_eq!(provider.year_established, 2015);
                assert!(provider.client_types_served.contains(&ClientType::LocalCompanies));
                assert_eq!(attachments.regulatory_notice.file_name, "acra-notice.pdf");
                assert!(attachments.company_profile.is_some());
            }
            other => panic!("expected WithProvider, got {other:?}"),
        }
    }

    #[test]
    fn email_shapes() {
        for good in ["a@b.com", "first.last@sub.domain.org"] {
            assert!(is_valid_email(good), "{good} should be valid");
        }
        for bad in ["", "plain", "@b.com", "a@", "a@b", "a b@c.com", "a@.com", "a@b.com."] {
            assert!(!is_valid_email(bad), "{bad} should be invalid");
        }
    }
}
