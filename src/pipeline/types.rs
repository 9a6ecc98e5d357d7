use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ExtractionError;

/// Structured fields extracted from one certificate of insurance.
///
/// Every field is independently nullable: the model is instructed to return
/// an explicit `null` for anything it cannot read. `raw` keeps the verbatim
/// payload for audit storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyExtraction {
    #[serde(default)]
    pub producer_name: Option<String>,
    #[serde(default)]
    pub insured_name: Option<String>,
    #[serde(default)]
    pub insurer_name: Option<String>,
    /// Expected lexical form `YYYY-MM-DD`; validated by the status resolver,
    /// not here.
    #[serde(default)]
    pub policy_expiration_date: Option<String>,
    #[serde(default)]
    pub general_liability_limit: Option<f64>,
    #[serde(default)]
    pub confidence_score: Option<f32>,
    /// Verbatim object returned by the model.
    #[serde(skip)]
    pub raw: Value,
}

/// Request body for the provider's `generateContent` call: one text part
/// (the prompt) and one inline base64 document part.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateRequest {
    /// Build the prompt-plus-document payload sent to every candidate model.
    pub fn document(prompt: &str, mime_type: &str, file_bytes: &[u8]) -> Self {
        let data = base64::engine::general_purpose::STANDARD.encode(file_bytes);
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data,
                        },
                    },
                ],
            }],
        }
    }
}

/// Extraction provider abstraction (allows mocking).
///
/// `generate` returns the provider's raw success envelope; interpreting it
/// belongs to the parser. A provider 404 surfaces as
/// [`ExtractionError::ModelNotFound`], the gateway's skip-to-next signal.
pub trait GenerativeClient: Send + Sync {
    fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<Value, ExtractionError>> + Send;
}

/// Mock extraction client for testing. Pops scripted outcomes in order and
/// records which models were called.
pub struct MockGenerativeClient {
    outcomes: Mutex<VecDeque<Result<Value, ExtractionError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockGenerativeClient {
    pub fn with_outcomes(outcomes: Vec<Result<Value, ExtractionError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Models called so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }
}

impl GenerativeClient for MockGenerativeClient {
    async fn generate(
        &self,
        model: &str,
        _request: &GenerateRequest,
    ) -> Result<Value, ExtractionError> {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .push(model.to_string());
        self.outcomes
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(ExtractionError::HttpClient("mock outcomes exhausted".into())))
    }
}
