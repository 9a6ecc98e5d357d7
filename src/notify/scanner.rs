//! Expiration scan. Read-only; a query failure degrades to an empty set.

use chrono::NaiveDate;
use tracing::{error, info};

use crate::db::PolicyStore;
use crate::models::ExpiringPolicy;

/// Default lookahead horizon for the nag cycle, in days.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// All active policies expiring within the horizon, with vendor contacts.
///
/// A query failure is logged and yields an empty set; the caller proceeds
/// as if nothing were expiring.
pub async fn scan_expiring<P: PolicyStore>(
    policies: &P,
    today: NaiveDate,
    horizon_days: u32,
) -> Vec<ExpiringPolicy> {
    match policies.expiring_within(today, horizon_days).await {
        Ok(found) => {
            info!(count = found.len(), horizon_days, "expiration scan complete");
            found
        }
        Err(e) => {
            error!(error = %e, "expiration scan query failed, treating as empty");
            Vec::new()
        }
    }
}
