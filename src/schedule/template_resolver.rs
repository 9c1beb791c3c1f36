//! Template resolution from raw department day lists.
//!
//! Department day lists are compact and order-sensitive in a way that
//! predates this engine: end days may be listed out of period order when
//! a period spans a month boundary, and payout days are stored reversed
//! relative to period index, with `1` meaning the last day of the month.
//! This module turns those lists into validated templates, one per
//! period-in-cycle.

use tracing::warn;

use crate::models::{Anomaly, Department, PayPeriodTemplate, PayoutDay};

use super::day_pattern::parse_day_list;

/// The outcome of resolving one department's day lists.
#[derive(Debug, Clone)]
pub struct ResolvedTemplates {
    /// The resolved templates, `period_number` 1..=N in order.
    pub templates: Vec<PayPeriodTemplate>,
    /// Data-quality conditions recovered during resolution.
    pub anomalies: Vec<Anomaly>,
}

/// Resolves a department's raw day lists into pay period templates.
///
/// For `period_count = min(|start_days|, |end_days|)` periods:
///
/// 1. The end day pairs directly when `end_days[i] >= start_days[i]`;
///    otherwise the first end value `>= start` (scanning left to right)
///    is used, and if none exists the smallest end value is taken as an
///    explicit month-spanning period.
/// 2. The payout day is looked up at the reversed index
///    `len - 1 - i` first, falling back to the direct index; the raw
///    value `1` maps to [`PayoutDay::Last`].
/// 3. `payout_month_offset` is 1 iff the period spans a month boundary.
/// 4. When no payout day resolves at all, month-spanning periods default
///    to day 15 of the following month and same-month periods to the
///    last day of the period's month; the fallback is reported.
///
/// A department with an empty start or end list yields no templates and
/// a `missing_day_lists` anomaly — a data-quality condition, not an
/// error.
pub fn resolve_templates(department: &Department) -> ResolvedTemplates {
    let start_days = parse_day_list(department.start_days.as_deref());
    let end_days = parse_day_list(department.end_days.as_deref());
    let payout_days = parse_day_list(department.payout_days.as_deref());

    if start_days.is_empty() || end_days.is_empty() {
        warn!(
            department_id = %department.id,
            "department has no usable start/end day lists, skipping"
        );
        return ResolvedTemplates {
            templates: Vec::new(),
            anomalies: vec![Anomaly::missing_day_lists(&department.id)],
        };
    }

    let period_count = start_days.len().min(end_days.len());
    let mut templates = Vec::with_capacity(period_count);
    let mut anomalies = Vec::new();

    for index in 0..period_count {
        let start_day = start_days[index];
        let end_day = resolve_end_day(start_day, index, &end_days);
        let spans_month = end_day < start_day;
        let payout_month_offset = u32::from(spans_month);

        let payout_day = match resolve_payout_day(&payout_days, index) {
            Some(day) => day,
            None => {
                warn!(
                    department_id = %department.id,
                    period_number = index + 1,
                    "no payout day resolved, applying default"
                );
                anomalies.push(Anomaly::payout_day_fallback(
                    &department.id,
                    (index + 1) as u32,
                ));
                if spans_month {
                    PayoutDay::Day(15)
                } else {
                    PayoutDay::Last
                }
            }
        };

        templates.push(PayPeriodTemplate {
            id: None,
            department_id: department.id.clone(),
            period_number: (index + 1) as u32,
            start_day,
            end_day,
            payout_day,
            payout_month_offset,
            is_active: true,
        });
    }

    ResolvedTemplates {
        templates,
        anomalies,
    }
}

/// Picks the end day belonging to the period that starts on `start_day`.
///
/// Day lists like end "10, 25" against start "11, 26" store the ends out
/// of period order: 25 belongs to the period starting on the 11th, and 10
/// to the month-spanning period starting on the 26th.
fn resolve_end_day(start_day: u32, index: usize, end_days: &[u32]) -> u32 {
    let direct = end_days[index];
    if direct >= start_day {
        return direct;
    }
    end_days
        .iter()
        .copied()
        .find(|&day| day >= start_day)
        .unwrap_or_else(|| end_days.iter().copied().min().unwrap_or(direct))
}

/// Resolves the payout day for the period at `index`.
///
/// Payout lists are stored reversed relative to period index ("15, 1"
/// means period 1 pays on the last day, period 2 on the 15th); the
/// reversed position is tried first, then the direct one.
fn resolve_payout_day(payout_days: &[u32], index: usize) -> Option<PayoutDay> {
    if payout_days.is_empty() {
        return None;
    }
    let value = payout_days
        .len()
        .checked_sub(1 + index)
        .map(|reversed| payout_days[reversed])
        .or_else(|| payout_days.get(index).copied())?;
    Some(PayoutDay::from_sentinel(value))
}
