//! The submission orchestrator.
//!
//! Executes the dependent remote calls in strict sequence, threading the
//! identifier produced by each stage into the next. A failure at any stage is
//! terminal: nothing downstream is attempted, nothing upstream is rolled back,
//! and the outcome carries the stage tag so callers can report exactly how far
//! the submission got.

use std::fmt;

use thiserror::Error;

use crate::api::BaseRegistryApi;
use crate::record::{Submission, SubmissionReceipt};

/// Shown when a backend failure carries no message of its own.
const GENERIC_STAGE_MESSAGE: &str = "The submission could not be completed. Please try again.";

/// The ordered remote operations of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Base,
    Provider,
    Attachments,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Base => "base",
            Stage::Provider => "provider",
            Stage::Attachments => "attachments",
        };
        f.write_str(name)
    }
}

/// Terminal pipeline failure, tagged with the stage at which it occurred.
///
/// Remote records created by earlier stages remain persisted; there is no
/// compensating transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission failed at the {stage} stage: {message}")]
pub struct StageError {
    pub stage: Stage,
    pub message: String,
}

/// Run the pipeline for a validated submission.
///
/// `InterestOnly` submissions end after the first call. `WithProvider`
/// submissions continue with the provider registration (carrying the interest
/// id returned by stage one) and then the attachment upload (addressed to the
/// provider id returned by stage two). Stages are strictly sequential; no
/// call is issued speculatively and no stage is retried.
pub async fn submit(
    api: &dyn BaseRegistryApi,
    submission: &Submission,
) -> Result<SubmissionReceipt, StageError> {
    let registers_as_provider = submission.registers_as_provider();
    tracing::info!(registers_as_provider, "Starting submission pipeline");

    let interest_id = api
        .create_interest(submission.interest(), registers_as_provider)
        .await
        .map_err(|err| stage_error(Stage::Base, err))?;
    tracing::info!(interest_id = %interest_id, "Interest registration created");

    let (provider, attachments) = match submission {
        Submission::InterestOnly(_) => {
            tracing::info!(interest_id = %interest_id, "Submission complete");
            return Ok(SubmissionReceipt {
                interest_id,
                provider_id: None,
            });
        }
        Submission::WithProvider {
            provider,
            attachments,
            ..
        } => (provider, attachments),
    };

    let provider_id = api
        .create_provider(&interest_id, provider)
        .await
        .map_err(|err| stage_error(Stage::Provider, err))?;
    tracing::info!(provider_id = %provider_id, "Provider registration created");

    api.upload_attachments(&provider_id, attachments)
        .await
        .map_err(|err| stage_error(Stage::Attachments, err))?;
    tracing::info!(provider_id = %provider_id, "Attachments uploaded, submission complete");

    Ok(SubmissionReceipt {
        interest_id,
        provider_id: Some(provider_id),
    })
}

fn stage_error(stage: Stage, err: anyhow::Error) -> StageError {
    tracing::error!(%stage, error = ?err, "Submission stage failed");
    let message = err.to_string();
    let message = if message.trim().is_empty() {
        GENERIC_STAGE_MESSAGE.to_string()
    } else {
        message
    };
    StageError { stage, message }
}
