use serde_json::Value;

use super::types::{GenerateRequest, GenerativeClient};
use super::ExtractionError;

/// Google Generative Language API endpoint.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on one extraction request. A timeout is treated like any
/// other transport failure and moves the gateway to the next candidate.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Gemini HTTP client for document extraction.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    /// Client against the hosted Google endpoint.
    pub fn google(api_key: &str) -> Self {
        Self::new(GEMINI_API_BASE, api_key)
    }
}

impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<Value, ExtractionError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractionError::HttpClient(format!(
                        "request timed out after {REQUEST_TIMEOUT_SECS}s"
                    ))
                } else {
                    ExtractionError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::ModelNotFound {
                model: model.to_string(),
                body,
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ExtractionError::HttpClient(format!("invalid JSON envelope: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_trailing_slash() {
        let client = GeminiClient::new("https://example.test/", "key");
        assert_eq!(client.base_url, "https://example.test");
    }

    #[test]
    fn google_uses_hosted_endpoint() {
        let client = GeminiClient::google("key");
        assert_eq!(client.base_url, GEMINI_API_BASE);
        assert_eq!(client.api_key, "key");
    }
}
