//! Certificate ingestion webhook.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::types::{ApiContext, WebhookPayload, WebhookResponse};
use crate::db::{DocumentStore, PolicyStore};
use crate::pipeline::{GenerativeClient, ProcessOutcome};

/// `POST /webhook/process-coi`: drive one upload event to a terminal
/// status. The caller always gets the structured response shape, including
/// for bodies that fail to deserialize.
pub async fn process<C, D, P>(
    State(ctx): State<ApiContext<C, D, P>>,
    payload: Result<Json<WebhookPayload>, JsonRejection>,
) -> Json<WebhookResponse>
where
    C: GenerativeClient,
    D: DocumentStore,
    P: PolicyStore,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection, "rejected malformed webhook payload");
            return Json(WebhookResponse::error(format!(
                "invalid payload: {rejection}"
            )));
        }
    };

    let Some(policy_id) = record_id(&payload.record) else {
        warn!(table = %payload.table, "webhook record missing id");
        return Json(WebhookResponse::error("record is missing an id"));
    };
    let Some(document_url) = payload.record.get("document_url").and_then(Value::as_str) else {
        warn!(%policy_id, "webhook record missing document_url");
        return Json(WebhookResponse::error("record is missing a document_url"));
    };

    info!(
        %policy_id,
        document_url,
        event_type = %payload.event_type,
        "processing upload event"
    );

    let today = Utc::now().date_naive();
    match ctx
        .processor
        .process_event(&policy_id, document_url, today)
        .await
    {
        ProcessOutcome::Processed { status } => Json(WebhookResponse::Success {
            policy_status: status,
        }),
        ProcessOutcome::Failed { message } => Json(WebhookResponse::Error { message }),
    }
}

/// The record identifier, as text. Datastore ids may be UUIDs or integers;
/// both are treated as opaque.
fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
