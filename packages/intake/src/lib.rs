//! # Intake
//!
//! The entity formation intake core: conditional validation, a one-shot
//! confirmation gate, and the dependent-call submission pipeline.
//!
//! ## Shape of the problem
//!
//! A submitter registers interest in forming a business entity, optionally
//! layered with a corporate service provider (CSP) registration and a
//! supporting-document upload. The hard part is the pipeline: up to three
//! dependent remote calls where each payload needs the identifier returned by
//! the previous response, governed by validation rules that change with one
//! discriminant flag, behind a confirmation gate that must be explicitly
//! accepted before any network effect occurs.
//!
//! ## Architecture
//!
//! ```text
//! FormData ──validate()──► Submission (tagged: InterestOnly | WithProvider)
//!     │                        │
//!     ▼                        ▼
//! FormSession ──confirm──► pipeline::submit(api, submission)
//!   editing                    │ 1. create interest     ──► InterestId
//!   confirming                 │ 2. create provider(id) ──► ProviderId
//!   submitting                 │ 3. upload attachments(id)
//!   succeeded/failed ◄─────────┘ outcome: receipt or stage-tagged error
//! ```
//!
//! ## Key invariants
//!
//! 1. **Illegal states are unrepresentable** - a [`Submission`] with the
//!    provider flag but missing provider fields cannot be constructed
//! 2. **The pipeline never sees an invalid form** - the gate revalidates
//! 3. **One submission in flight** - enforced by the session phase, not an
//!    ambient flag
//! 4. **Strictly sequential stages** - no speculative calls, no retries, no
//!    rollback of earlier stages when a later one fails
//!
//! ## What this is not
//!
//! Not a transaction: a failure after stage one leaves the earlier remote
//! records persisted, reported truthfully via the stage tag. Resubmission
//! restarts from stage one and may duplicate the interest record.

pub mod api;
pub mod form;
pub mod pipeline;
pub mod record;
pub mod session;
pub mod validation;

// Testing utilities (feature-gated)
#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use api::{BaseRegistryApi, RegistryApi};
pub use form::{FileUpload, FormData};
pub use pipeline::{Stage, StageError};
pub use record::{
    AttachmentBundle, ClientType, EntityKind, InterestId, InterestRecord, ProviderApplication,
    ProviderId, Submission, SubmissionReceipt,
};
pub use session::{FormSession, Phase, SessionError};
pub use validation::{validate, FieldErrors};

// Re-export for trait implementors
pub use async_trait::async_trait;
