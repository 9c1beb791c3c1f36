//! Query filters and pagination for record listings.
//!
//! The store contract supports range comparisons (`gte`, `lte`) and
//! set-membership (`in`) per field; a field with no entry is
//! unconstrained. Filters serialize to the wire shape
//! `{"field": {"gte": ..., "lte": ..., "in": [...]}}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::{FieldValue, Record};

/// The constraints applied to a single field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Lower bound (inclusive), compared as ISO text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<String>,
    /// Upper bound (inclusive), compared as ISO text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<String>,
    /// Set membership: the value (or any referenced id) must be in the set.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub within: Option<Vec<String>>,
}

impl Condition {
    /// Checks a field value against this condition.
    ///
    /// Range bounds compare as text. A date-only bound matched against a
    /// datetime value compares only the date part, so `lte: "2025-11-25"`
    /// admits `"2025-11-25T23:00:00Z"`.
    pub fn matches(&self, value: Option<&FieldValue>) -> bool {
        if let Some(ids) = &self.within {
            let member = value.is_some_and(|v| ids.iter().any(|id| v.contains_reference(id)));
            if !member {
                return false;
            }
        }

        if self.gte.is_some() || self.lte.is_some() {
            let Some(text) = value.map(comparable_text) else {
                return false;
            };
            if let Some(gte) = &self.gte {
                if clip_to_bound(&text, gte) < gte.as_str() {
                    return false;
                }
            }
            if let Some(lte) = &self.lte {
                if clip_to_bound(&text, lte) > lte.as_str() {
                    return false;
                }
            }
        }

        true
    }
}

fn comparable_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Reference(ids) => ids.first().cloned().unwrap_or_default(),
    }
}

/// Strips the time component when the bound is date-only.
fn clip_to_bound<'a>(value: &'a str, bound: &str) -> &'a str {
    if !bound.contains('T') {
        value.split('T').next().unwrap_or(value)
    } else {
        value
    }
}

/// A per-field filter for `list_records`.
///
/// # Example
///
/// ```
/// use pay_period_engine::store::Filter;
///
/// let filter = Filter::new()
///     .range("punch_in_time", "2025-11-11", "2025-11-25")
///     .within("time_card_id", vec!["rec_tc1".to_string()]);
/// assert_eq!(
///     filter.describe(),
///     "punch_in_time in [2025-11-11, 2025-11-25], time_card_id in {1 ids}"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, Condition>);

impl Filter {
    /// Creates an empty filter (no constraints).
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains a field to an inclusive range.
    pub fn range(mut self, field: impl Into<String>, gte: impl Into<String>, lte: impl Into<String>) -> Self {
        self.0.insert(
            field.into(),
            Condition {
                gte: Some(gte.into()),
                lte: Some(lte.into()),
                within: None,
            },
        );
        self
    }

    /// Constrains a field to a membership set.
    pub fn within(mut self, field: impl Into<String>, ids: Vec<String>) -> Self {
        self.0.insert(
            field.into(),
            Condition {
                gte: None,
                lte: None,
                within: Some(ids),
            },
        );
        self
    }

    /// True when the filter has no constraints.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks a record against every condition.
    ///
    /// The pseudo-field `id` matches against the record id rather than a
    /// stored field.
    pub fn matches(&self, record: &Record) -> bool {
        self.0.iter().all(|(field, condition)| {
            if field == "id" {
                let id_value = FieldValue::Text(record.id.clone());
                condition.matches(Some(&id_value))
            } else {
                condition.matches(record.field(field))
            }
        })
    }

    /// A short human-readable form for error messages and logs.
    pub fn describe(&self) -> String {
        if self.0.is_empty() {
            return "no filter".to_string();
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, c)| match (&c.gte, &c.lte, &c.within) {
                (Some(gte), Some(lte), _) => format!("{field} in [{gte}, {lte}]"),
                (Some(gte), None, _) => format!("{field} >= {gte}"),
                (None, Some(lte), _) => format!("{field} <= {lte}"),
                (None, None, Some(ids)) => format!("{field} in {{{} ids}}", ids.len()),
                (None, None, None) => format!("{field}: unconstrained"),
            })
            .collect();
        parts.join(", ")
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A pagination window for `list_records`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Maximum number of records to return.
    pub limit: usize,
    /// Number of matching records to skip.
    pub offset: usize,
}

impl Page {
    /// Creates a page window.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// The first page of the given size.
    pub fn first(limit: usize) -> Self {
        Self { limit, offset: 0 }
    }
}

/// One page of a record listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    /// The records in this page, in store order.
    pub records: Vec<Record>,
    /// Whether more records match beyond this page.
    #[serde(default)]
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn punch(id: &str, punch_in: &str) -> Record {
        Record::new(id).with_field("punch_in_time", punch_in)
    }

    #[test]
    fn test_range_matches_inclusive_bounds() {
        let filter = Filter::new().range("punch_in_time", "2025-11-11", "2025-11-25");
        assert!(filter.matches(&punch("p1", "2025-11-11")));
        assert!(filter.matches(&punch("p2", "2025-11-25")));
        assert!(!filter.matches(&punch("p3", "2025-11-10")));
        assert!(!filter.matches(&punch("p4", "2025-11-26")));
    }

    #[test]
    fn test_date_only_bound_admits_datetime_values() {
        let filter = Filter::new().range("punch_in_time", "2025-11-11", "2025-11-25");
        assert!(filter.matches(&punch("p1", "2025-11-25T23:30:00Z")));
        assert!(filter.matches(&punch("p2", "2025-11-11T00:00:00Z")));
        assert!(!filter.matches(&punch("p3", "2025-11-26T00:00:00Z")));
    }

    #[test]
    fn test_missing_field_fails_range() {
        let filter = Filter::new().range("punch_in_time", "2025-11-11", "2025-11-25");
        assert!(!filter.matches(&Record::new("p1")));
    }

    #[test]
    fn test_within_matches_linked_references() {
        let filter = Filter::new().within("pay_period_id", vec!["pp_1".to_string()]);
        let linked = Record::new("tc_1").with_field("pay_period_id", FieldValue::reference("pp_1"));
        let other = Record::new("tc_2").with_field("pay_period_id", FieldValue::reference("pp_2"));
        assert!(filter.matches(&linked));
        assert!(!filter.matches(&other));
    }

    #[test]
    fn test_id_pseudo_field_matches_record_id() {
        let filter = Filter::new().within("id", vec!["emp_2".to_string()]);
        assert!(filter.matches(&Record::new("emp_2")));
        assert!(!filter.matches(&Record::new("emp_1")));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::new().matches(&Record::new("anything")));
    }

    #[test]
    fn test_wire_serialization_uses_in_keyword() {
        let filter = Filter::new().within("time_card_id", vec!["tc_1".to_string()]);
        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, r#"{"time_card_id":{"in":["tc_1"]}}"#);
    }

    #[test]
    fn test_describe_reads_naturally() {
        let filter = Filter::new().range("punch_in_time", "2025-11-11", "2025-11-25");
        assert_eq!(filter.describe(), "punch_in_time in [2025-11-11, 2025-11-25]");
        assert_eq!(Filter::new().describe(), "no filter");
    }
}
