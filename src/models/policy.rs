use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of a policy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    /// Set by intake when the row is created; never written by the pipeline.
    Pending,
    Active,
    Rejected,
    Error,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Pending => "pending",
            PolicyStatus::Active => "active",
            PolicyStatus::Rejected => "rejected",
            PolicyStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column set written onto one policy row after an ingestion event.
///
/// Absent extraction fields are serialized as explicit nulls so the row
/// never silently keeps a stale value.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyUpdate {
    pub carrier_name: Option<String>,
    /// Placeholder; policy numbers are not extracted by this pipeline.
    pub policy_number: String,
    pub expiration_date: Option<NaiveDate>,
    pub limit_amount: Option<f64>,
    pub ocr_confidence_score: Option<f32>,
    /// Verbatim model payload, kept for audit and debugging.
    pub ocr_data: Value,
    pub processing_status: PolicyStatus,
}

/// Vendor contact joined onto a policy row by the expiration scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorContact {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// One row returned by the expiration scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiringPolicy {
    pub id: String,
    #[serde(default)]
    pub carrier_name: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    /// Present when the row has a linked vendor.
    #[serde(default)]
    pub vendors: Option<VendorContact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PolicyStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&PolicyStatus::Rejected).unwrap(),
            "\"rejected\""
        );
        assert_eq!(PolicyStatus::Error.to_string(), "error");
    }

    #[test]
    fn expiring_policy_parses_joined_row() {
        let row = serde_json::json!({
            "id": "7c2f6d2e-8a4b-4f0e-9a11-000000000001",
            "carrier_name": "Acme Mutual",
            "expiration_date": "2024-06-20",
            "processing_status": "active",
            "vendors": { "company_name": "Vendor Co", "contact_email": "ops@vendor.co" }
        });

        let policy: ExpiringPolicy = serde_json::from_value(row).unwrap();
        assert_eq!(policy.carrier_name.as_deref(), Some("Acme Mutual"));
        assert_eq!(
            policy.expiration_date,
            NaiveDate::from_ymd_opt(2024, 6, 20)
        );
        let vendor = policy.vendors.unwrap();
        assert_eq!(vendor.contact_email.as_deref(), Some("ops@vendor.co"));
    }

    #[test]
    fn expiring_policy_tolerates_missing_join() {
        let row = serde_json::json!({
            "id": "p-unlinked",
            "expiration_date": "2024-06-20",
            "vendors": null
        });

        let policy: ExpiringPolicy = serde_json::from_value(row).unwrap();
        assert!(policy.vendors.is_none());
        assert!(policy.carrier_name.is_none());
    }

    #[test]
    fn update_writes_explicit_nulls() {
        let update = PolicyUpdate {
            carrier_name: None,
            policy_number: "PENDING".into(),
            expiration_date: None,
            limit_amount: None,
            ocr_confidence_score: None,
            ocr_data: Value::Null,
            processing_status: PolicyStatus::Error,
        };

        let body = serde_json::to_value(&update).unwrap();
        assert!(body.get("carrier_name").unwrap().is_null());
        assert!(body.get("expiration_date").unwrap().is_null());
        assert_eq!(body["processing_status"], "error");
    }
}
