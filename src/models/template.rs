//! Pay period template model.
//!
//! A template describes one period of a department's repeating monthly
//! cycle in day-of-month terms. Templates are created once by the
//! migration workflow, corrected by fixups, and deactivated rather than
//! deleted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store::{FieldValue, Fields, Record};

/// The payout day of a period: a concrete day of month, or the last day.
///
/// The store representation is the string `"last"` or the decimal day.
/// Raw department payout lists use the value `1` as the sentinel for the
/// last day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PayoutDay {
    /// The last day of the payout month, whatever its length.
    Last,
    /// A fixed day of month, clamped to the month's length on
    /// instantiation.
    Day(u32),
}

impl PayoutDay {
    /// Maps a raw payout-list value to a payout day (`1` means last).
    pub fn from_sentinel(day: u32) -> Self {
        if day == 1 { PayoutDay::Last } else { PayoutDay::Day(day) }
    }
}

impl fmt::Display for PayoutDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoutDay::Last => f.write_str("last"),
            PayoutDay::Day(day) => write!(f, "{day}"),
        }
    }
}

impl FromStr for PayoutDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("last") {
            return Ok(PayoutDay::Last);
        }
        s.parse::<u32>()
            .map(PayoutDay::Day)
            .map_err(|_| format!("invalid payout day: '{s}'"))
    }
}

impl TryFrom<String> for PayoutDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayoutDay> for String {
    fn from(value: PayoutDay) -> Self {
        value.to_string()
    }
}

/// One period of a department's repeating pay cycle.
///
/// For a cycle of N templates, `period_number` values are exactly `1..=N`
/// and, interpreted as a repeating monthly cycle, the day ranges partition
/// the month. A period spans a month boundary iff `end_day < start_day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriodTemplate {
    /// The store record id, once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The owning department's record id.
    pub department_id: String,
    /// 1-based position in the cycle; stable ordering is cycle order.
    pub period_number: u32,
    /// Day of month the period starts on (1–31).
    pub start_day: u32,
    /// Day of month the period ends on (1–31).
    pub end_day: u32,
    /// The payout day for the period.
    pub payout_day: PayoutDay,
    /// 0 = payout in the period's end month, 1 = the following month.
    pub payout_month_offset: u32,
    /// Inactive templates are skipped during instantiation.
    pub is_active: bool,
}

impl PayPeriodTemplate {
    /// True when the period crosses a month boundary (e.g. 26th–10th).
    pub fn spans_month(&self) -> bool {
        self.end_day < self.start_day
    }

    /// Maps a store record to a template.
    ///
    /// Returns `None` when the record is missing its day pairing — such
    /// records are unusable for instantiation. A missing `is_active`
    /// checkbox reads as active; only an explicit `false` deactivates.
    pub fn from_record(record: &Record) -> Option<Self> {
        let period_number = record.number("period_number")? as u32;
        let start_day = record.number("start_day")? as u32;
        let end_day = record.number("end_day")? as u32;
        let payout_day = record
            .text("payout_day")
            .and_then(|s| s.parse().ok())
            .unwrap_or(PayoutDay::Last);
        let payout_month_offset = record.number("payout_month_offset").unwrap_or(0.0) as u32;

        Some(Self {
            id: Some(record.id.clone()),
            department_id: record.reference("department_id").unwrap_or("").to_string(),
            period_number,
            start_day,
            end_day,
            payout_day,
            payout_month_offset,
            is_active: record.flag("is_active", true),
        })
    }

    /// The field map used to persist this template.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(
            "department_id".to_string(),
            FieldValue::reference(self.department_id.clone()),
        );
        fields.insert("period_number".to_string(), self.period_number.into());
        fields.insert("start_day".to_string(), self.start_day.into());
        fields.insert("end_day".to_string(), self.end_day.into());
        fields.insert(
            "payout_day".to_string(),
            FieldValue::Text(self.payout_day.to_string()),
        );
        fields.insert(
            "payout_month_offset".to_string(),
            self.payout_month_offset.into(),
        );
        fields.insert("is_active".to_string(), self.is_active.into());
        fields
    }
}
