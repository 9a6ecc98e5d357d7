//! Ingestion orchestrator: drives one upload event to a terminal status.
//!
//! download → extract → resolve status → persist. Any failure along the way
//! marks the record `error` on a best-effort basis and surfaces as a
//! [`ProcessOutcome::Failed`]; this layer never returns `Err` to its caller.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info};

use super::gateway::ModelGateway;
use super::status;
use super::types::GenerativeClient;
use super::ExtractionError;
use crate::db::{DocumentStore, PolicyStore, StoreError};
use crate::models::{PolicyStatus, PolicyUpdate};

/// Placeholder for the policy-number column; policy numbers are not
/// extracted by this pipeline.
const POLICY_NUMBER_PLACEHOLDER: &str = "PENDING";

#[derive(Debug, Error)]
enum ProcessError {
    #[error("storage download failed: {0}")]
    Storage(StoreError),

    #[error("extraction failed: {0}")]
    Extraction(ExtractionError),

    #[error("failed to persist extraction: {0}")]
    Persistence(StoreError),
}

/// Terminal outcome of one ingestion event. Failures are data, not panics:
/// the webhook layer converts this directly into its response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Processed { status: PolicyStatus },
    Failed { message: String },
}

pub struct IngestionProcessor<C, D, P> {
    gateway: ModelGateway<C>,
    documents: D,
    policies: P,
}

impl<C, D, P> IngestionProcessor<C, D, P>
where
    C: GenerativeClient,
    D: DocumentStore,
    P: PolicyStore,
{
    pub fn new(gateway: ModelGateway<C>, documents: D, policies: P) -> Self {
        Self {
            gateway,
            documents,
            policies,
        }
    }

    /// Process one upload event for `policy_id`.
    ///
    /// Exactly one record is mutated, keyed by `policy_id`. A missing or
    /// unusable expiration date is not a failure; the record is persisted
    /// with status `error` and the event still reports that status. On a
    /// pipeline failure the status is marked `error` on a best-effort basis
    /// and the original failure is reported; a failure of that secondary
    /// mark is logged and discarded.
    pub async fn process_event(
        &self,
        policy_id: &str,
        document_path: &str,
        today: NaiveDate,
    ) -> ProcessOutcome {
        match self.run_pipeline(policy_id, document_path, today).await {
            Ok(status) => {
                info!(%policy_id, %status, "ingestion complete");
                ProcessOutcome::Processed { status }
            }
            Err(e) => {
                error!(%policy_id, error = %e, "ingestion failed");
                self.mark_error(policy_id).await;
                ProcessOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn run_pipeline(
        &self,
        policy_id: &str,
        document_path: &str,
        today: NaiveDate,
    ) -> Result<PolicyStatus, ProcessError> {
        let file_bytes = self
            .documents
            .download(document_path)
            .await
            .map_err(ProcessError::Storage)?;

        let extraction = self
            .gateway
            .extract(&file_bytes, document_path)
            .await
            .map_err(ProcessError::Extraction)?;

        let resolution = status::resolve(extraction.policy_expiration_date.as_deref(), today);

        let update = PolicyUpdate {
            carrier_name: extraction.insurer_name.clone(),
            policy_number: POLICY_NUMBER_PLACEHOLDER.to_string(),
            expiration_date: resolution.expiration,
            limit_amount: extraction.general_liability_limit,
            ocr_confidence_score: extraction.confidence_score,
            ocr_data: extraction.raw.clone(),
            processing_status: resolution.status,
        };

        self.policies
            .apply_extraction(policy_id, &update)
            .await
            .map_err(ProcessError::Persistence)?;

        Ok(resolution.status)
    }

    /// Best-effort secondary mark; its own failure must never mask the
    /// original one.
    async fn mark_error(&self, policy_id: &str) {
        if let Err(e) = self.policies.set_status(policy_id, PolicyStatus::Error).await {
            error!(%policy_id, error = %e, "failed to mark record as error");
        }
    }
}
