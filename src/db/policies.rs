//! Policy-table collaborator: record updates and the expiration scan.

use std::future::Future;

use chrono::{Days, NaiveDate};
use tracing::info;

use super::StoreError;
use crate::models::{ExpiringPolicy, PolicyStatus, PolicyUpdate};

const POLICIES_TABLE: &str = "policies";

/// Policy persistence abstraction (allows mocking).
pub trait PolicyStore: Send + Sync {
    /// Write the full extraction result onto one record.
    fn apply_extraction(
        &self,
        policy_id: &str,
        update: &PolicyUpdate,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Write only the lifecycle status onto one record.
    fn set_status(
        &self,
        policy_id: &str,
        status: PolicyStatus,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Active policies expiring in the closed interval
    /// `[today, today + horizon_days]`, joined with their vendor contact.
    fn expiring_within(
        &self,
        today: NaiveDate,
        horizon_days: u32,
    ) -> impl Future<Output = Result<Vec<ExpiringPolicy>, StoreError>> + Send;
}

/// Supabase PostgREST client for the policy table.
#[derive(Clone)]
pub struct SupabasePolicies {
    base_url: String,
    service_key: String,
    client: reqwest::Client,
}

impl SupabasePolicies {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, POLICIES_TABLE)
    }

    async fn patch(&self, policy_id: &str, body: &serde_json::Value) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.table_url())
            .query(&[("id", format!("eq.{policy_id}"))])
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("Prefer", "return=minimal")
            .json(body)
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
        Ok(())
    }
}

impl PolicyStore for SupabasePolicies {
    async fn apply_extraction(
        &self,
        policy_id: &str,
        update: &PolicyUpdate,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_value(update).map_err(|e| StoreError::Decode(e.to_string()))?;
        self.patch(policy_id, &body).await
    }

    async fn set_status(&self, policy_id: &str, status: PolicyStatus) -> Result<(), StoreError> {
        self.patch(policy_id, &serde_json::json!({ "processing_status": status }))
            .await
    }

    async fn expiring_within(
        &self,
        today: NaiveDate,
        horizon_days: u32,
    ) -> Result<Vec<ExpiringPolicy>, StoreError> {
        let filters = scan_filters(today, horizon_days);
        info!(%today, horizon_days, "querying policies nearing expiration");

        let response = self
            .client
            .get(self.table_url())
            .query(&filters)
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

        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// Filter pairs for the expiration scan: vendor join, status equality, and
/// the closed date interval `[today, today + horizon]`.
fn scan_filters(today: NaiveDate, horizon_days: u32) -> [(String, String); 4] {
    let target = today
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);
    [
        (
            "select".into(),
            "*,vendors(company_name,contact_email)".into(),
        ),
        (
            "processing_status".into(),
            format!("eq.{}", PolicyStatus::Active),
        ),
        ("expiration_date".into(), format!("gte.{today}")),
        ("expiration_date".into(), format!("lte.{target}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_filters_cover_the_closed_interval() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let filters = scan_filters(today, 30);

        assert_eq!(filters[1].1, "eq.active");
        assert_eq!(filters[2], ("expiration_date".into(), "gte.2024-06-01".into()));
        assert_eq!(filters[3], ("expiration_date".into(), "lte.2024-07-01".into()));
    }

    #[test]
    fn scan_filters_join_the_vendor_contact() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let filters = scan_filters(today, 30);
        assert_eq!(filters[0].1, "*,vendors(company_name,contact_email)");
    }

    #[test]
    fn table_url_targets_the_policy_table() {
        let store = SupabasePolicies::new("https://proj.supabase.co/", "key");
        assert_eq!(
            store.table_url(),
            "https://proj.supabase.co/rest/v1/policies"
        );
    }
}
