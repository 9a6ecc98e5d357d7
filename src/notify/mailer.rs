//! Reminder construction and delivery.
//!
//! Recipient resolution prefers the linked vendor contact and falls back to
//! a fixed operator address, so test records without a vendor still surface
//! a visible notification. Delivery goes through Resend's HTTP API when a
//! credential is configured; otherwise the mailer logs the reminder and
//! reports it as sent.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::NotifyError;
use crate::models::ExpiringPolicy;

/// Resend HTTP API endpoint.
const RESEND_API_BASE: &str = "https://api.resend.com";

/// Salutation used when no vendor company name is resolvable.
const FALLBACK_VENDOR_NAME: &str = "Valued Vendor";

/// Carrier label used when extraction left the carrier blank.
const UNKNOWN_CARRIER: &str = "Unknown Carrier";

/// Resolved reminder target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub email: String,
    pub vendor_name: String,
}

/// Resolve who receives the reminder for one expiring policy.
pub fn resolve_recipient(policy: &ExpiringPolicy, fallback_email: &str) -> Recipient {
    if let Some(vendor) = &policy.vendors {
        if let Some(email) = vendor
            .contact_email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
        {
            return Recipient {
                email: email.to_string(),
                vendor_name: vendor
                    .company_name
                    .clone()
                    .unwrap_or_else(|| FALLBACK_VENDOR_NAME.to_string()),
            };
        }
    }

    Recipient {
        email: fallback_email.to_string(),
        vendor_name: FALLBACK_VENDOR_NAME.to_string(),
    }
}

/// Subject line for one expiring policy.
pub fn reminder_subject(policy: &ExpiringPolicy) -> String {
    format!(
        "ACTION REQUIRED: Insurance Certificate Expiring - {}",
        policy.carrier_name.as_deref().unwrap_or(UNKNOWN_CARRIER)
    )
}

/// Body for one expiring policy. Field substitution only; no localization.
pub fn reminder_body(policy: &ExpiringPolicy, recipient: &Recipient, portal_url: &str) -> String {
    let carrier = policy.carrier_name.as_deref().unwrap_or(UNKNOWN_CARRIER);
    let expires = policy
        .expiration_date
        .map(|date| date.to_string())
        .unwrap_or_else(|| "soon".to_string());

    format!(
        "Dear {vendor},\n\n\
         Our records indicate that your Commercial General Liability policy ({carrier}) \
         will expire on {expires}.\n\n\
         To maintain your active vendor status and avoid payment holds, please upload \
         your renewed Certificate of Insurance to our secure portal immediately.\n\n\
         Portal Link: {portal_url}\n\
         Reference ID: {id}\n\n\
         Instructions:\n\
         1. Click the portal link above.\n\
         2. Click 'Continue with Google' to securely access your dashboard.\n\
         3. Upload your renewed PDF document.\n\n\
         This is an automated message from CoverWatch.",
        vendor = recipient.vendor_name,
        id = policy.id,
    )
}

/// Delivery outcome for one reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Accepted by the provider.
    Delivered { provider_id: String },
    /// No provider credential configured; the reminder was logged instead.
    MockLogged,
}

/// Reminder delivery abstraction (allows mocking).
pub trait ReminderMailer: Send + Sync {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Result<SendOutcome, NotifyError>> + Send;
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Resend HTTP mailer. Without an API key it runs in log-only mode and
/// still reports the reminder as sent.
pub struct ResendMailer {
    base_url: String,
    api_key: Option<String>,
    from: String,
    client: reqwest::Client,
}

impl ResendMailer {
    pub fn new(base_url: &str, api_key: Option<String>, from: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            from: from.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Mailer against the hosted Resend endpoint.
    pub fn resend(api_key: Option<String>, from: &str) -> Self {
        Self::new(RESEND_API_BASE, api_key, from)
    }

    pub fn is_mock(&self) -> bool {
        self.api_key.is_none()
    }
}

impl ReminderMailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<SendOutcome, NotifyError> {
        let Some(api_key) = &self.api_key else {
            info!(%to, %subject, "no email credential configured, logging reminder only");
            info!("\n{body}");
            return Ok(SendOutcome::MockLogged);
        };

        let request = SendEmailRequest {
            from: &self.from,
            to,
            subject,
            text: body,
        };
        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifyError::HttpClient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Decode(e.to_string()))?;

        info!(%to, provider_id = %parsed.id, "reminder email sent");
        Ok(SendOutcome::Delivered {
            provider_id: parsed.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::VendorContact;

    const FALLBACK: &str = "compliance-ops@coverwatch.dev";

    fn policy(vendors: Option<VendorContact>) -> ExpiringPolicy {
        ExpiringPolicy {
            id: "p-77".into(),
            carrier_name: Some("Acme Mutual".into()),
            expiration_date: NaiveDate::from_ymd_opt(2024, 6, 20),
            vendors,
        }
    }

    #[test]
    fn linked_vendor_with_email_wins() {
        let recipient = resolve_recipient(
            &policy(Some(VendorContact {
                company_name: Some("Vendor Co".into()),
                contact_email: Some("ops@vendor.co".into()),
            })),
            FALLBACK,
        );
        assert_eq!(recipient.email, "ops@vendor.co");
        assert_eq!(recipient.vendor_name, "Vendor Co");
    }

    #[test]
    fn missing_vendor_falls_back() {
        let recipient = resolve_recipient(&policy(None), FALLBACK);
        assert_eq!(recipient.email, FALLBACK);
        assert_eq!(recipient.vendor_name, FALLBACK_VENDOR_NAME);
    }

    #[test]
    fn empty_contact_email_falls_back() {
        let recipient = resolve_recipient(
            &policy(Some(VendorContact {
                company_name: Some("Vendor Co".into()),
                contact_email: Some("   ".into()),
            })),
            FALLBACK,
        );
        assert_eq!(recipient.email, FALLBACK);
        assert_eq!(recipient.vendor_name, FALLBACK_VENDOR_NAME);
    }

    #[test]
    fn vendor_email_without_name_uses_generic_salutation() {
        let recipient = resolve_recipient(
            &policy(Some(VendorContact {
                company_name: None,
                contact_email: Some("ops@vendor.co".into()),
            })),
            FALLBACK,
        );
        assert_eq!(recipient.email, "ops@vendor.co");
        assert_eq!(recipient.vendor_name, FALLBACK_VENDOR_NAME);
    }

    #[test]
    fn subject_names_the_carrier() {
        assert!(reminder_subject(&policy(None)).contains("Acme Mutual"));

        let mut unbranded = policy(None);
        unbranded.carrier_name = None;
        assert!(reminder_subject(&unbranded).contains(UNKNOWN_CARRIER));
    }

    #[test]
    fn body_substitutes_every_field() {
        let recipient = Recipient {
            email: "ops@vendor.co".into(),
            vendor_name: "Vendor Co".into(),
        };
        let body = reminder_body(&policy(None), &recipient, "https://portal.example");

        assert!(body.contains("Dear Vendor Co,"));
        assert!(body.contains("Acme Mutual"));
        assert!(body.contains("2024-06-20"));
        assert!(body.contains("https://portal.example"));
        assert!(body.contains("Reference ID: p-77"));
    }

    #[tokio::test]
    async fn mock_mode_reports_sent_without_network() {
        let mailer = ResendMailer::resend(None, "onboarding@resend.dev");
        assert!(mailer.is_mock());

        let outcome = mailer.send("ops@vendor.co", "subject", "body").await.unwrap();
        assert_eq!(outcome, SendOutcome::MockLogged);
    }
}
