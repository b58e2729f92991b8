//! The form session state machine.
//!
//! `FormSession` owns the raw form data and the submission phase. Validity is
//! a derived value recomputed from the schema on demand, never a stored flag,
//! so it cannot go stale. The phase value is the single source of truth for
//! which affordances are available: the confirmation gate only opens from a
//! valid form, the pipeline only starts from the gate, and at most one
//! submission is in flight because every entry point checks the phase first.

use thiserror::Error;

use crate::api::BaseRegistryApi;
use crate::form::FormData;
use crate::pipeline::{self, StageError};
use crate::record::{Submission, SubmissionReceipt};
use crate::validation::{validate, FieldErrors};

/// Where the session currently is.
///
/// `Editing` covers both a fresh form and returning from review; validity
/// within it is derived, not a separate phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Editing,
    /// The one-shot interstitial: the user must explicitly confirm before any
    /// network effect occurs.
    Confirming,
    Submitting,
    Succeeded(SubmissionReceipt),
    Failed(StageError),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Editing => "editing",
            Phase::Confirming => "confirming",
            Phase::Submitting => "submitting",
            Phase::Succeeded(_) => "succeeded",
            Phase::Failed(_) => "failed",
        }
    }
}

/// Why a session action was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The form has validation errors; the map carries one message per field.
    #[error("form has validation errors")]
    Invalid(FieldErrors),

    /// The action does not apply in the current phase (e.g. confirming while
    /// a submission is already in flight).
    #[error("{action} is not available while the session is {phase}")]
    Unavailable {
        action: &'static str,
        phase: &'static str,
    },
}

#[derive(Debug, Default)]
pub struct FormSession {
    data: FormData,
    phase: Phase,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Editing
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Run the schema against the current data. Derived on every call.
    pub fn validation(&self) -> Result<Submission, FieldErrors> {
        validate(&self.data)
    }

    /// Current per-field errors; empty when the form is valid.
    pub fn field_errors(&self) -> FieldErrors {
        self.validation().err().unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        self.validation().is_ok()
    }

    /// Whether the submit affordance should be enabled right now.
    pub fn can_request_confirmation(&self) -> bool {
        matches!(self.phase, Phase::Editing | Phase::Failed(_)) && self.is_valid()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        match &self.phase {
            Phase::Succeeded(receipt) => Some(receipt),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&StageError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Mutate the form and revalidate. Editing a failed session returns it to
    /// `Editing` with all values kept; edits are ignored while confirming,
    /// submitting, or after success (those phases disable the inputs).
    pub fn update(&mut self, mutate: impl FnOnce(&mut FormData)) -> FieldErrors {
        match self.phase {
            Phase::Editing => {}
            Phase::Failed(_) => self.phase = Phase::Editing,
            _ => {
                tracing::warn!(phase = self.phase.name(), "Edit ignored outside editing phase");
                return self.field_errors();
            }
        }
        mutate(&mut self.data);
        self.field_errors()
    }

    /// The explicit submit action: opens the confirmation gate iff the form
    /// currently validates. Invalid forms never reach the gate.
    pub fn request_confirmation(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Editing | Phase::Failed(_) => match self.validation() {
                Ok(_) => {
                    self.phase = Phase::Confirming;
                    Ok(())
                }
                Err(errors) => Err(SessionError::Invalid(errors)),
            },
            _ => Err(SessionError::Unavailable {
                action: "submit",
                phase: self.phase.name(),
            }),
        }
    }

    /// The "review again" action: back to editing without discarding values.
    pub fn back_to_editing(&mut self) {
        if matches!(self.phase, Phase::Confirming) {
            self.phase = Phase::Editing;
        }
    }

    /// The explicit confirm action. Hands the validated submission to the
    /// caller and enters `Submitting`; from then on submit and confirm are
    /// refused until a terminal outcome arrives via [`Self::complete`].
    pub fn begin_submission(&mut self) -> Result<Submission, SessionError> {
        if !matches!(self.phase, Phase::Confirming) {
            return Err(SessionError::Unavailable {
                action: "confirm",
                phase: self.phase.name(),
            });
        }
        match self.validation() {
            Ok(submission) => {
                self.phase = Phase::Submitting;
                Ok(submission)
            }
            // Data cannot change while confirming, but the gate re-checks
            // rather than trusting a stored flag.
            Err(errors) => {
                self.phase = Phase::Editing;
                Err(SessionError::Invalid(errors))
            }
        }
    }

    /// Record the pipeline outcome. Failure keeps the form populated so the
    /// user can retry without retyping.
    pub fn complete(&mut self, outcome: Result<SubmissionReceipt, StageError>) {
        if !matches!(self.phase, Phase::Submitting) {
            tracing::warn!(
                phase = self.phase.name(),
                "Pipeline outcome reported outside an active submission"
            );
            return;
        }
        self.phase = match outcome {
            Ok(receipt) => Phase::Succeeded(receipt),
            Err(err) => Phase::Failed(err),
        };
    }

    /// The explicit "submit another" action: only from `Succeeded`, and the
    /// only path that clears field values and files back to defaults.
    pub fn start_another(&mut self) {
        if matches!(self.phase, Phase::Succeeded(_)) {
            self.data = FormData::default();
            self.phase = Phase::Editing;
        }
    }

    /// Convenience driver: confirm, run the pipeline, record the outcome.
    ///
    /// Returns `Err` only when the confirm action itself was refused; stage
    /// failures land in the phase, queryable via [`Self::failure`].
    pub async fn submit(&mut self, api: &dyn BaseRegistryApi) -> Result<(), SessionError> {
        let submission = self.begin_submission()?;
        let outcome = pipeline::submit(api, &submission).await;
        self.complete(outcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Stage;
    use crate::record::InterestId;
    use crate::testing::{fill_interest_form, valid_interest_form};

    fn stage_failure() -> StageError {
        StageError {
            stage: Stage::Base,
            message: "registry unavailable".into(),
        }
    }

    #[test]
    fn new_session_is_editing_and_invalid() {
        let session = FormSession::new();
        assert_eq!(session.phase().name(), "editing");
        assert!(!session.is_valid());
        assert!(!session.can_request_confirmation());
    }

    #[test]
    fn validity_is_recomputed_on_every_update() {
        let mut session = FormSession::new();
        let errors = session.update(fill_interest_form);
        assert!(errors.is_empty());
        assert!(session.can_request_confirmation());

        let errors = session.update(|data| data.contact_email = "broken".into());
        assert!(!errors.is_empty());
        assert!(!session.can_request_confirmation());
    }

    #[test]
    fn confirmation_gate_rejects_invalid_forms() {
        let mut session = FormSession::new();
        let err = session.request_confirmation().unwrap_err();
        match err {
            SessionError::Invalid(errors) => assert!(!errors.is_empty()),
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(session.phase().name(), "editing");
    }

    #[test]
    fn confirmation_gate_opens_for_valid_forms() {
        let mut session = FormSession::new();
        session.update(fill_interest_form);
        session.request_confirmation().unwrap();
        assert_eq!(session.phase().name(), "confirming");
    }

    #[test]
    fn review_again_keeps_entered_values() {
        let mut session = FormSession::new();
        session.update(fill_interest_form);
        session.request_confirmation().unwrap();
        session.back_to_editing();

        assert_eq!(session.phase().name(), "editing");
        assert_eq!(session.data(), &valid_interest_form());
    }

    #[test]
    fn begin_submission_requires_the_gate() {
        let mut session = FormSession::new();
        session.update(fill_interest_form);

        let err = session.begin_submission().unwrap_err();
        match err {
            SessionError::Unavailable { action, phase } => {
                assert_eq!(action, "confirm");
                assert_eq!(phase, "editing");
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn submitting_phase_refuses_submit_confirm_and_edits() {
        let mut session = FormSession::new();
        session.update(fill_interest_form);
        session.request_confirmation().unwrap();
        session.begin_submission().unwrap();
        assert_eq!(session.phase().name(), "submitting");

        assert!(matches!(
            session.request_confirmation(),
            Err(SessionError::Unavailable { .. })
        ));
        assert!(matches!(
            session.begin_submission(),
            Err(SessionError::Unavailable { .. })
        ));

        session.update(|data| data.contact_email = "edited@mid.flight".into());
        assert_eq!(session.data().contact_email, "a@b.com");
    }

    #[test]
    fn success_keeps_receipt_until_explicit_reset() {
        let mut session = FormSession::new();
        session.update(fill_interest_form);
        session.request_confirmation().unwrap();
        session.begin_submission().unwrap();
        session.complete(Ok(SubmissionReceipt {
            interest_id: InterestId::new("int-1"),
            provider_id: None,
        }));

        assert_eq!(session.phase().name(), "succeeded");
        assert_eq!(session.receipt().unwrap().interest_id.as_str(), "int-1");
        // Data is not cleared automatically.
        assert_eq!(session.data().contact_email, "a@b.com");

        session.start_another();
        assert_eq!(session.phase().name(), "editing");
        assert_eq!(session.data(), &FormData::default());
    }

    #[test]
    fn start_another_is_a_no_op_outside_success() {
        let mut session = FormSession::new();
        session.update(fill_interest_form);
        session.start_another();
        assert_eq!(session.data().contact_email, "a@b.com");
    }

    #[test]
    fn failure_preserves_data_and_allows_retry() {
        let mut session = FormSession::new();
        session.update(fill_interest_form);
        session.request_confirmation().unwrap();
        session.begin_submission().unwrap();
        session.complete(Err(stage_failure()));

        assert_eq!(session.phase().name(), "failed");
        assert_eq!(session.failure().unwrap().stage, Stage::Base);
        assert_eq!(session.data().contact_email, "a@b.com");

        // Retry goes back through the gate, from stage one.
        session.request_confirmation().unwrap();
        assert_eq!(session.phase().name(), "confirming");
    }

    #[test]
    fn editing_a_failed_session_returns_it_to_editing() {
        let mut session = FormSession::new();
        session.update(fill_interest_form);
        session.request_confirmation().unwrap();
        session.begin_submission().unwrap();
        session.complete(Err(stage_failure()));

        session.update(|data| data.origin_country = "Otherland".into());
        assert_eq!(session.phase().name(), "editing");
        assert_eq!(session.data().origin_country, "Otherland");
        assert!(session.failure().is_none());
    }

    #[test]
    fn completion_outside_submitting_is_ignored() {
        let mut session = FormSession::new();
        session.complete(Err(stage_failure()));
        assert_eq!(session.phase().name(), "editing");
    }
}
