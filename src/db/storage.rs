//! Object-storage collaborator: certificate downloads.

use std::future::Future;

use tracing::info;

use super::StoreError;

/// Bucket holding uploaded certificates. Event paths arrive prefixed with
/// the bucket name; the prefix is stripped before lookup.
const COI_BUCKET: &str = "cois";

/// Document download abstraction (allows mocking).
pub trait DocumentStore: Send + Sync {
    fn download(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, StoreError>> + Send;
}

/// Supabase Storage client.
#[derive(Clone)]
pub struct SupabaseStorage {
    base_url: String,
    service_key: String,
    client: reqwest::Client,
}

impl SupabaseStorage {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl DocumentStore for SupabaseStorage {
    async fn download(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let object_path = strip_bucket_prefix(path);
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, COI_BUCKET, object_path
        );
        info!(object_path, "downloading certificate from storage");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(|e| StoreError::HttpClient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StoreError::HttpClient(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Strip the leading bucket segment from an event path.
fn strip_bucket_prefix(path: &str) -> &str {
    path.strip_prefix("cois/").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_prefix_is_stripped_once() {
        assert_eq!(strip_bucket_prefix("cois/p1.pdf"), "p1.pdf");
        assert_eq!(strip_bucket_prefix("p1.pdf"), "p1.pdf");
        // Only the leading bucket segment goes; interior segments stay.
        assert_eq!(
            strip_bucket_prefix("cois/vendor/cois/p1.pdf"),
            "vendor/cois/p1.pdf"
        );
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let store = SupabaseStorage::new("https://proj.supabase.co/", "key");
        assert_eq!(store.base_url, "https://proj.supabase.co");
    }
}
