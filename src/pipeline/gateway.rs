//! Ordered-fallback gateway to the extraction provider.
//!
//! Candidates are tried strictly in sequence, most capable first; the first
//! reply that parses wins and no further candidates are called. A provider
//! 404 is the "model unavailable" signal and skips to the next candidate;
//! every other failure is recorded and also skips. Exhausting the list is an
//! error carrying the last recorded failure detail.

use tracing::{error, info, warn};

use super::parser;
use super::prompt::EXTRACTION_PROMPT;
use super::types::{GenerateRequest, GenerativeClient, PolicyExtraction};
use super::ExtractionError;

/// Candidate extraction models, in preference order.
pub const CANDIDATE_MODELS: &[&str] = &[
    "gemini-2.5-flash-preview-09-2025",
    "gemini-2.5-flash",
    "gemini-1.5-flash-latest",
    "gemini-1.5-flash",
];

/// One candidate's recorded outcome, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct ModelAttempt {
    pub model: String,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Provider reported the model missing; expected, non-fatal.
    Unavailable(String),
    /// Transport/HTTP failure or unparsable reply.
    Failed(String),
}

/// Per-candidate decision: succeed and stop, or continue down the list.
enum CandidateOutcome {
    Parsed(PolicyExtraction),
    Skipped(String),
    Failed(String),
}

/// Tries candidate models in order until one returns a parseable extraction.
pub struct ModelGateway<C> {
    client: C,
    models: Vec<String>,
}

impl<C: GenerativeClient> ModelGateway<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            models: CANDIDATE_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Override the candidate list (tests).
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    /// Extract policy data from one document.
    ///
    /// `file_path` is used only to infer the payload content type.
    pub async fn extract(
        &self,
        file_bytes: &[u8],
        file_path: &str,
    ) -> Result<PolicyExtraction, ExtractionError> {
        let mime_type = infer_mime_type(file_path);
        info!(mime_type, document_size = file_bytes.len(), "starting extraction");

        let request = GenerateRequest::document(EXTRACTION_PROMPT, mime_type, file_bytes);
        let mut attempts: Vec<ModelAttempt> = Vec::new();

        for model in &self.models {
            match self.try_candidate(model, &request).await {
                CandidateOutcome::Parsed(extraction) => {
                    info!(%model, skipped = attempts.len(), "extraction succeeded");
                    return Ok(extraction);
                }
                CandidateOutcome::Skipped(detail) => {
                    warn!(%model, %detail, "model unavailable, trying next candidate");
                    attempts.push(ModelAttempt {
                        model: model.clone(),
                        outcome: AttemptOutcome::Unavailable(detail),
                    });
                }
                CandidateOutcome::Failed(detail) => {
                    error!(%model, %detail, "extraction attempt failed");
                    attempts.push(ModelAttempt {
                        model: model.clone(),
                        outcome: AttemptOutcome::Failed(detail),
                    });
                }
            }
        }

        Err(ExtractionError::AttemptsExhausted(exhaustion_detail(
            &attempts,
        )))
    }

    async fn try_candidate(&self, model: &str, request: &GenerateRequest) -> CandidateOutcome {
        match self.client.generate(model, request).await {
            Ok(envelope) => match parser::parse_extraction_response(&envelope) {
                Ok(extraction) => CandidateOutcome::Parsed(extraction),
                Err(e) => CandidateOutcome::Failed(e.to_string()),
            },
            Err(ExtractionError::ModelNotFound { body, .. }) => CandidateOutcome::Skipped(body),
            Err(e) => CandidateOutcome::Failed(e.to_string()),
        }
    }
}

/// Last real failure across the attempt log, or a summary when every
/// candidate was merely unavailable.
fn exhaustion_detail(attempts: &[ModelAttempt]) -> String {
    attempts
        .iter()
        .rev()
        .find_map(|attempt| match &attempt.outcome {
            AttemptOutcome::Failed(detail) => Some(detail.clone()),
            AttemptOutcome::Unavailable(_) => None,
        })
        .unwrap_or_else(|| "no candidate model was available".to_string())
}

/// Infer the payload content type from the document path suffix.
///
/// Anything that is not a recognized image extension is sent as PDF.
pub fn infer_mime_type(file_path: &str) -> &'static str {
    let lower = file_path.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "application/pdf"
    }
}
