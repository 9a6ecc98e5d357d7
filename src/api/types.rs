//! Webhook wire types and shared handler state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::PolicyStatus;
use crate::pipeline::IngestionProcessor;

/// Upload event delivered by the datastore's webhook.
///
/// `record` stays opaque here; the handler pulls out the identifier and the
/// document reference and answers anything malformed with a structured error
/// body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    pub table: String,
    pub record: Value,
    #[serde(rename = "schema")]
    pub schema_name: String,
    #[serde(default)]
    pub old_record: Option<Value>,
}

/// The webhook's only response shape: success or error, always JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WebhookResponse {
    Success { policy_status: PolicyStatus },
    Error { message: String },
}

impl WebhookResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Shared state handed to every handler.
pub struct ApiContext<C, D, P> {
    pub processor: Arc<IngestionProcessor<C, D, P>>,
}

impl<C, D, P> Clone for ApiContext<C, D, P> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
        }
    }
}
