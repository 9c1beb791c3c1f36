//! Department model.
//!
//! A department owns the raw pay-period configuration: a discriminator and
//! three comma-separated day lists. The lists stay as text here; the
//! schedule module parses and resolves them.

use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A department with its raw pay-period configuration.
///
/// Read-only input to the engine; owned externally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// The store record id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Pay period type discriminator (e.g. "semi_monthly"). Departments
    /// without one have no pay-period configuration yet.
    pub pay_period_type: Option<String>,
    /// Comma-separated period start days, e.g. "11, 26".
    pub start_days: Option<String>,
    /// Comma-separated period end days, e.g. "10, 25".
    pub end_days: Option<String>,
    /// Comma-separated payout days, e.g. "15, 1" (1 = last day of month).
    pub payout_days: Option<String>,
}

impl Department {
    /// Maps a store record to a department.
    ///
    /// The name field is stored as either `Name` or `name` depending on
    /// when the table was provisioned.
    pub fn from_record(record: &Record) -> Self {
        let name = record
            .text("Name")
            .or_else(|| record.text("name"))
            .unwrap_or("Unknown")
            .to_string();
        Self {
            id: record.id.clone(),
            name,
            pay_period_type: record.text("pay_period_type").map(str::to_string),
            start_days: record.text("pay_period_start_days").map(str::to_string),
            end_days: record.text("pay_period_end_days").map(str::to_string),
            payout_days: record.text("payout_days").map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_maps_all_fields() {
        let record = Record::new("rec_dept")
            .with_field("Name", "Warehouse")
            .with_field("pay_period_type", "semi_monthly")
            .with_field("pay_period_start_days", "11, 26")
            .with_field("pay_period_end_days", "10, 25")
            .with_field("payout_days", "15, 1");

        let department = Department::from_record(&record);
        assert_eq!(department.id, "rec_dept");
        assert_eq!(department.name, "Warehouse");
        assert_eq!(department.pay_period_type.as_deref(), Some("semi_monthly"));
        assert_eq!(department.start_days.as_deref(), Some("11, 26"));
        assert_eq!(department.end_days.as_deref(), Some("10, 25"));
        assert_eq!(department.payout_days.as_deref(), Some("15, 1"));
    }

    #[test]
    fn test_from_record_accepts_lowercase_name() {
        let record = Record::new("rec_dept").with_field("name", "Front Desk");
        assert_eq!(Department::from_record(&record).name, "Front Desk");
    }

    #[test]
    fn test_from_record_defaults_missing_name() {
        let record = Record::new("rec_dept");
        let department = Department::from_record(&record);
        assert_eq!(department.name, "Unknown");
        assert_eq!(department.pay_period_type, None);
        assert_eq!(department.start_days, None);
    }
}
