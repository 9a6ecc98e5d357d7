//! Nag cycle: scan, then one reminder per result, sequentially.

use chrono::NaiveDate;
use tracing::{error, info};

use super::mailer::{self, ReminderMailer};
use super::scanner;
use crate::db::PolicyStore;

/// Counts for one cycle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleSummary {
    pub targets: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Runs the expiration scan and dispatches one reminder per result.
pub struct NagCycle<P, M> {
    policies: P,
    mailer: M,
    portal_url: String,
    fallback_email: String,
}

impl<P, M> NagCycle<P, M>
where
    P: PolicyStore,
    M: ReminderMailer,
{
    pub fn new(policies: P, mailer: M, portal_url: &str, fallback_email: &str) -> Self {
        Self {
            policies,
            mailer,
            portal_url: portal_url.to_string(),
            fallback_email: fallback_email.to_string(),
        }
    }

    /// One full cycle. A failing send is logged and never blocks the
    /// remaining records. There is no suppression state: a policy inside the
    /// horizon is re-notified on every run until its status changes.
    pub async fn run(&self, today: NaiveDate, horizon_days: u32) -> CycleSummary {
        info!(%today, horizon_days, "starting nag cycle");
        let expiring = scanner::scan_expiring(&self.policies, today, horizon_days).await;

        if expiring.is_empty() {
            info!("no policies expiring within the horizon");
            return CycleSummary::default();
        }

        let mut summary = CycleSummary {
            targets: expiring.len(),
            ..Default::default()
        };

        for policy in &expiring {
            let recipient = mailer::resolve_recipient(policy, &self.fallback_email);
            let subject = mailer::reminder_subject(policy);
            let body = mailer::reminder_body(policy, &recipient, &self.portal_url);

            match self.mailer.send(&recipient.email, &subject, &body).await {
                Ok(_) => summary.sent += 1,
                Err(e) => {
                    error!(
                        policy_id = %policy.id,
                        to = %recipient.email,
                        error = %e,
                        "reminder send failed"
                    );
                    summary.failed += 1;
                }
            }
        }

        info!(
            targets = summary.targets,
            sent = summary.sent,
            failed = summary.failed,
            "nag cycle complete"
        );
        summary
    }
}
