//! Instantiated pay period model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A concrete pay period with absolute calendar dates.
///
/// Derived from a [`PayPeriodTemplate`](super::PayPeriodTemplate) and an
/// anchor month; immutable once computed, and never the source of truth
/// (it may be cached externally).
///
/// # Example
///
/// ```
/// use pay_period_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     department_id: "rec_dept".to_string(),
///     template_ref: None,
///     period_number: 2,
///     start_date: NaiveDate::from_ymd_opt(2025, 11, 26).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 12, 10).unwrap(),
///     payout_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The owning department's record id.
    pub department_id: String,
    /// The record id of the template this period was instantiated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_ref: Option<String>,
    /// The template's position in the cycle.
    pub period_number: u32,
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
    /// The payout date for the period.
    pub payout_date: NaiveDate,
}

impl PayPeriod {
    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
