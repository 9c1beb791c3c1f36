//! Punch aggregation.
//!
//! This module retrieves time-clock punches for a period's date range,
//! links them to time cards when the linkage data cooperates, computes
//! per-punch hours with a documented fallback chain, and rolls totals up
//! per employee.

mod aggregator;
mod hours;
mod punch_pager;

pub use aggregator::{
    aggregate_employee_hours, aggregate_period, AggregationResult, PeriodHoursReport,
};
pub use hours::{parse_timestamp, punch_hours, PunchHours};
pub use punch_pager::{PunchPager, RetrievedPunches};
