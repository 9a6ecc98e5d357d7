use chrono::NaiveDate;

use crate::models::PolicyStatus;

/// Lexical form the model is instructed to use for dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of resolving a policy's lifecycle status from its extracted
/// expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusResolution {
    pub status: PolicyStatus,
    /// Parsed expiration, when the extracted string was a valid calendar
    /// date.
    pub expiration: Option<NaiveDate>,
}

/// Derive a lifecycle status from the extracted expiration date.
///
/// Date-only comparison: a policy expiring today is still `Active`. A
/// missing or unparsable date yields `Error`: the certificate was read but
/// is unusable for compliance.
pub fn resolve(expiration_date: Option<&str>, today: NaiveDate) -> StatusResolution {
    let Some(raw) = expiration_date else {
        return StatusResolution {
            status: PolicyStatus::Error,
            expiration: None,
        };
    };

    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) if date < today => StatusResolution {
            status: PolicyStatus::Rejected,
            expiration: Some(date),
        },
        Ok(date) => StatusResolution {
            status: PolicyStatus::Active,
            expiration: Some(date),
        },
        Err(_) => StatusResolution {
            status: PolicyStatus::Error,
            expiration: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn absent_date_is_error() {
        let resolution = resolve(None, today());
        assert_eq!(resolution.status, PolicyStatus::Error);
        assert!(resolution.expiration.is_none());
    }

    #[test]
    fn unparsable_date_is_error() {
        for raw in ["06/01/2024", "June 1 2024", "2024-02-30", ""] {
            let resolution = resolve(Some(raw), today());
            assert_eq!(resolution.status, PolicyStatus::Error, "input {raw:?}");
            assert!(resolution.expiration.is_none());
        }
    }

    #[test]
    fn past_date_is_rejected() {
        let resolution = resolve(Some("2024-05-31"), today());
        assert_eq!(resolution.status, PolicyStatus::Rejected);
        assert_eq!(
            resolution.expiration,
            NaiveDate::from_ymd_opt(2024, 5, 31)
        );
    }

    #[test]
    fn today_is_still_active() {
        let resolution = resolve(Some("2024-06-01"), today());
        assert_eq!(resolution.status, PolicyStatus::Active);
    }

    #[test]
    fn future_date_is_active() {
        let resolution = resolve(Some("2099-01-01"), today());
        assert_eq!(resolution.status, PolicyStatus::Active);
        assert_eq!(
            resolution.expiration,
            NaiveDate::from_ymd_opt(2099, 1, 1)
        );
    }
}
