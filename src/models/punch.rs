//! Time card, punch, and hours summary models.
//!
//! Punches come from a time-clock table whose linkage to time cards is
//! known to be unreliable: `time_card_id` may be absent or stale, either
//! timestamp may be missing, and a precomputed `duration` may or may not
//! be present. Timestamps stay as raw text here and are parsed at the
//! point of use so a single bad value degrades rather than aborts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A time card linking punches to a pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCard {
    /// The store record id.
    pub id: String,
    /// The pay period this card belongs to.
    pub pay_period_id: Option<String>,
}

impl TimeCard {
    /// Maps a store record to a time card.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            pay_period_id: record.reference("pay_period_id").map(str::to_string),
        }
    }
}

/// A raw time-clock punch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Punch {
    /// The store record id.
    pub id: String,
    /// The punching employee; absent punches are dropped from roll-ups.
    pub employee_id: Option<String>,
    /// The client the work was billed to, when tracked.
    pub client_id: Option<String>,
    /// Linkage to a time card; may be absent or stale.
    pub time_card_id: Option<String>,
    /// Clock-in timestamp as delivered by the store.
    pub punch_in_time: Option<String>,
    /// Clock-out timestamp as delivered by the store.
    pub punch_out_time: Option<String>,
    /// Precomputed duration in hours, when the clock computed one.
    pub duration: Option<f64>,
}

impl Punch {
    /// Maps a store record to a punch, unwrapping linked-record fields.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            employee_id: record.reference("employee_id").map(str::to_string),
            client_id: record.reference("client_id").map(str::to_string),
            time_card_id: record.reference("time_card_id").map(str::to_string),
            punch_in_time: record.text("punch_in_time").map(str::to_string),
            punch_out_time: record.text("punch_out_time").map(str::to_string),
            duration: record.number("duration"),
        }
    }
}

/// Per-employee hour totals for a period.
///
/// Output only: recomputed per request, never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeHoursSummary {
    /// The employee's record id.
    pub employee_id: String,
    /// Total hours, non-negative, rounded to 2 decimal places.
    pub total_hours: Decimal,
    /// Number of punches contributing to the total (including zero-hour
    /// punches).
    pub punch_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FieldValue;

    #[test]
    fn test_punch_from_record_unwraps_references() {
        let record = Record::new("rec_p1")
            .with_field("employee_id", FieldValue::reference("rec_emp"))
            .with_field("time_card_id", FieldValue::reference("rec_tc"))
            .with_field("punch_in_time", "2025-11-12T09:00:00Z")
            .with_field("punch_out_time", "2025-11-12T17:00:00Z")
            .with_field("duration", 8.0);

        let punch = Punch::from_record(&record);
        assert_eq!(punch.employee_id.as_deref(), Some("rec_emp"));
        assert_eq!(punch.time_card_id.as_deref(), Some("rec_tc"));
        assert_eq!(punch.punch_in_time.as_deref(), Some("2025-11-12T09:00:00Z"));
        assert_eq!(punch.duration, Some(8.0));
        assert_eq!(punch.client_id, None);
    }

    #[test]
    fn test_punch_from_record_accepts_scalar_linkage() {
        let record = Record::new("rec_p1").with_field("employee_id", "rec_emp");
        let punch = Punch::from_record(&record);
        assert_eq!(punch.employee_id.as_deref(), Some("rec_emp"));
    }

    #[test]
    fn test_punch_from_sparse_record() {
        let punch = Punch::from_record(&Record::new("rec_p1"));
        assert_eq!(punch.employee_id, None);
        assert_eq!(punch.punch_in_time, None);
        assert_eq!(punch.duration, None);
    }

    #[test]
    fn test_time_card_from_record() {
        let record =
            Record::new("rec_tc").with_field("pay_period_id", FieldValue::reference("rec_pp"));
        let card = TimeCard::from_record(&record);
        assert_eq!(card.id, "rec_tc");
        assert_eq!(card.pay_period_id.as_deref(), Some("rec_pp"));
    }

    #[test]
    fn test_summary_serialization() {
        let summary = EmployeeHoursSummary {
            employee_id: "rec_emp".to_string(),
            total_hours: Decimal::new(550, 2),
            punch_count: 2,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"total_hours\":\"5.50\""));
        assert!(json.contains("\"punch_count\":2"));
    }
}
