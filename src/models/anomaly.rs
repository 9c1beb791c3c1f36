//! Data-quality anomalies reported by fallback paths.

use serde::{Deserialize, Serialize};

/// A recovered data-quality condition.
///
/// Every documented fallback in the engine reports one of these instead of
/// failing or silently degrading: batch operations complete with a
/// best-effort result plus the list of anomalies encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// A code identifying the type of anomaly.
    pub code: String,
    /// A human-readable description of the anomaly.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl Anomaly {
    fn new(code: &str, message: String, severity: &str) -> Self {
        Self {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        }
    }

    /// A department had no usable start or end day list.
    pub fn missing_day_lists(department_id: &str) -> Self {
        Self::new(
            "missing_day_lists",
            format!("department '{department_id}' has no start/end day lists; no templates resolved"),
            "medium",
        )
    }

    /// No payout day could be resolved for a period; the default was used.
    pub fn payout_day_fallback(department_id: &str, period_number: u32) -> Self {
        Self::new(
            "payout_day_fallback",
            format!(
                "department '{department_id}' period {period_number}: no payout day resolved, default applied"
            ),
            "low",
        )
    }

    /// More than one period claimed to be current.
    pub fn ambiguous_current_period(count: usize) -> Self {
        Self::new(
            "ambiguous_current_period",
            format!("{count} periods contain today; selected the first in template order"),
            "high",
        )
    }

    /// No period contained today.
    pub fn no_current_period() -> Self {
        Self::new(
            "no_current_period",
            "no period contains today; selected the first in template order".to_string(),
            "medium",
        )
    }

    /// No punches were linked to the supplied time cards.
    pub fn unlinked_punch_fallback(punch_count: usize) -> Self {
        Self::new(
            "unlinked_punch_fallback",
            format!("no punches linked to time cards; using all {punch_count} punches in range"),
            "medium",
        )
    }

    /// Punch retrieval hit the safety ceiling before the store ran dry.
    pub fn punch_ceiling_reached(retrieved: usize, ceiling: usize) -> Self {
        Self::new(
            "punch_ceiling_reached",
            format!("stopped paging after {retrieved} punches (ceiling {ceiling}); totals are partial"),
            "high",
        )
    }

    /// A punch carried a timestamp that could not be parsed.
    pub fn unparseable_timestamp(punch_id: &str, value: &str) -> Self {
        Self::new(
            "unparseable_timestamp",
            format!("punch '{punch_id}': timestamp '{value}' is unparseable; counted with zero hours"),
            "low",
        )
    }
}
