//! Request types for the Pay Period Engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request body for `POST /departments/{id}/periods`.
///
/// Instantiates the department's stored templates for the given anchor
/// month and labels each period relative to `today`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodsRequest {
    /// The anchor year.
    pub year: i32,
    /// The anchor month (1–12).
    pub month: u32,
    /// The date to classify periods against; defaults to the current
    /// date when omitted.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_with_optional_today() {
        let request: PeriodsRequest =
            serde_json::from_str(r#"{"year": 2025, "month": 11}"#).unwrap();
        assert_eq!(request.year, 2025);
        assert_eq!(request.month, 11);
        assert_eq!(request.today, None);

        let request: PeriodsRequest =
            serde_json::from_str(r#"{"year": 2025, "month": 11, "today": "2025-11-20"}"#).unwrap();
        assert_eq!(
            request.today,
            Some(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap())
        );
    }

    #[test]
    fn test_missing_year_is_rejected() {
        let result: Result<PeriodsRequest, _> = serde_json::from_str(r#"{"month": 11}"#);
        assert!(result.is_err());
    }
}
