//! Period instantiation against real calendar months.
//!
//! Templates speak in days-of-month; this module resolves them to
//! absolute dates for a given anchor month. All arithmetic goes through
//! `chrono`, so variable month lengths, leap years, and year rollovers
//! fall out of the calendar itself rather than any fixed assumption.

use chrono::{Datelike, NaiveDate};

use crate::models::{PayPeriod, PayPeriodTemplate, PayoutDay};

/// Returns the number of days in the given month.
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Advances a (year, month) pair by a number of months, rolling the year.
fn add_months(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let months = month as i32 - 1 + offset as i32;
    (year + months.div_euclid(12), (months.rem_euclid(12) + 1) as u32)
}

/// Builds a date in the given month, clamping the day to the month's
/// actual length (template day 31 resolves to the 30th in a 30-day
/// month).
fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.max(1).min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("clamped day is within the month")
}

/// Instantiates one template for the given anchor month.
///
/// The start date falls in the anchor month. The end date falls in the
/// anchor month for same-month templates, or in the following month when
/// the template spans a month boundary. The payout date lands
/// `payout_month_offset` months after the end date's month, on the
/// template's payout day (`last` resolving to that month's real last
/// day).
///
/// # Example
///
/// ```
/// use pay_period_engine::models::{PayPeriodTemplate, PayoutDay};
/// use pay_period_engine::schedule::instantiate_period;
/// use chrono::NaiveDate;
///
/// let template = PayPeriodTemplate {
///     id: None,
///     department_id: "rec_dept".to_string(),
///     period_number: 2,
///     start_day: 26,
///     end_day: 10,
///     payout_day: PayoutDay::Day(15),
///     payout_month_offset: 1,
///     is_active: true,
/// };
///
/// let period = instantiate_period(&template, 2025, 11);
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 11, 26).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 12, 10).unwrap());
/// assert_eq!(period.payout_date, NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
/// ```
pub fn instantiate_period(template: &PayPeriodTemplate, year: i32, month: u32) -> PayPeriod {
    let start_date = clamped_date(year, month, template.start_day);

    let end_date = if template.spans_month() {
        let (end_year, end_month) = add_months(year, month, 1);
        clamped_date(end_year, end_month, template.end_day)
    } else {
        clamped_date(year, month, template.end_day)
    };

    let (payout_year, payout_month) = add_months(
        end_date.year(),
        end_date.month(),
        template.payout_month_offset,
    );
    let payout_day = match template.payout_day {
        PayoutDay::Last => last_day_of_month(payout_year, payout_month),
        PayoutDay::Day(day) => day,
    };
    let payout_date = clamped_date(payout_year, payout_month, payout_day);

    PayPeriod {
        department_id: template.department_id.clone(),
        template_ref: template.id.clone(),
        period_number: template.period_number,
        start_date,
        end_date,
        payout_date,
    }
}

/// Instantiates a department's cycle for the given anchor month.
///
/// Inactive templates are skipped; output is ordered by `period_number`.
pub fn instantiate_cycle(
    templates: &[PayPeriodTemplate],
    year: i32,
    month: u32,
) -> Vec<PayPeriod> {
    let mut active: Vec<&PayPeriodTemplate> =
        templates.iter().filter(|t| t.is_active).collect();
    active.sort_by_key(|t| t.period_number);
    active
        .into_iter()
        .map(|template| instantiate_period(template, year, month))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn template(
        period_number: u32,
        start_day: u32,
        end_day: u32,
        payout_day: PayoutDay,
        payout_month_offset: u32,
    ) -> PayPeriodTemplate {
        PayPeriodTemplate {
            id: None,
            department_id: "rec_dept".to_string(),
            period_number,
            start_day,
            end_day,
            payout_day,
            payout_month_offset,
            is_active: true,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2025, 11), 30);
        assert_eq!(last_day_of_month(2025, 12), 31);
        assert_eq!(last_day_of_month(2024, 2), 29);
        assert_eq!(last_day_of_month(2025, 2), 28);
        assert_eq!(last_day_of_month(2000, 2), 29);
        assert_eq!(last_day_of_month(2100, 2), 28);
    }

    /// PI-001: month-spanning template for November 2025.
    #[test]
    fn test_month_spanning_period_november() {
        let template = template(2, 26, 10, PayoutDay::Day(15), 1);
        let period = instantiate_period(&template, 2025, 11);

        assert_eq!(period.start_date, date(2025, 11, 26));
        assert_eq!(period.end_date, date(2025, 12, 10));
        assert_eq!(period.payout_date, date(2025, 12, 15));
    }

    /// PI-002: same-month template with a last-day payout.
    #[test]
    fn test_same_month_period_november() {
        let template = template(1, 11, 25, PayoutDay::Last, 0);
        let period = instantiate_period(&template, 2025, 11);

        assert_eq!(period.start_date, date(2025, 11, 11));
        assert_eq!(period.end_date, date(2025, 11, 25));
        assert_eq!(period.payout_date, date(2025, 11, 30));
    }

    /// PI-003: "last" resolves through February's leap-year length.
    #[test]
    fn test_last_payout_in_february() {
        let template = template(1, 16, 28, PayoutDay::Last, 0);

        let leap = instantiate_period(&template, 2024, 2);
        assert_eq!(leap.payout_date, date(2024, 2, 29));

        let common = instantiate_period(&template, 2025, 2);
        assert_eq!(common.payout_date, date(2025, 2, 28));
    }

    /// PI-004: end day 31 clamps to a 30-day month.
    #[test]
    fn test_end_day_clamped_to_month_length() {
        let template = template(2, 16, 31, PayoutDay::Day(5), 1);
        let period = instantiate_period(&template, 2025, 4);
        assert_eq!(period.end_date, date(2025, 4, 30));
        assert_eq!(period.payout_date, date(2025, 5, 5));
    }

    /// PI-005: a month-spanning end clamps to the following month.
    #[test]
    fn test_spanning_end_clamped_in_february() {
        let template = template(2, 31, 30, PayoutDay::Day(5), 1);
        let period = instantiate_period(&template, 2025, 1);
        assert_eq!(period.start_date, date(2025, 1, 31));
        assert_eq!(period.end_date, date(2025, 2, 28));
        assert_eq!(period.payout_date, date(2025, 3, 5));
    }

    /// PI-006: December anchors roll the year forward.
    #[test]
    fn test_year_rollover() {
        let template = template(2, 26, 10, PayoutDay::Day(15), 1);
        let period = instantiate_period(&template, 2025, 12);

        assert_eq!(period.start_date, date(2025, 12, 26));
        assert_eq!(period.end_date, date(2026, 1, 10));
        assert_eq!(period.payout_date, date(2026, 1, 15));
    }

    /// PI-007: payout day overflow clamps to the payout month's length.
    #[test]
    fn test_payout_day_clamped() {
        let template = template(1, 1, 15, PayoutDay::Day(31), 0);
        let period = instantiate_period(&template, 2025, 4);
        assert_eq!(period.payout_date, date(2025, 4, 30));
    }

    #[test]
    fn test_cycle_skips_inactive_and_orders_by_period_number() {
        let mut second = template(2, 26, 10, PayoutDay::Day(15), 1);
        let first = template(1, 11, 25, PayoutDay::Last, 0);
        let mut retired = template(3, 1, 10, PayoutDay::Last, 0);
        retired.is_active = false;
        second.id = Some("rec_t2".to_string());

        let periods = instantiate_cycle(&[second.clone(), retired, first], 2025, 11);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].period_number, 1);
        assert_eq!(periods[1].period_number, 2);
        assert_eq!(periods[1].template_ref.as_deref(), Some("rec_t2"));
    }

    proptest! {
        /// Re-deriving the day pairing from instantiated dates recovers
        /// the template's days (away from month-length clamping).
        #[test]
        fn prop_round_trips_day_pairing(
            start_day in 1u32..=28,
            end_day in 1u32..=28,
            year in 2020i32..=2030,
            month in 1u32..=12,
        ) {
            let t = template(1, start_day, end_day, PayoutDay::Last, 0);
            let period = instantiate_period(&t, year, month);
            prop_assert_eq!(period.start_date.day(), start_day);
            prop_assert_eq!(period.end_date.day(), end_day);
            // Month-spanning iff end_day < start_day.
            let spans = period.end_date.month() != period.start_date.month();
            prop_assert_eq!(spans, end_day < start_day);
        }

        /// The payout date always lands inside its own month.
        #[test]
        fn prop_payout_date_is_valid(
            payout in 1u32..=31,
            offset in 0u32..=1,
            year in 2020i32..=2030,
            month in 1u32..=12,
        ) {
            let t = template(1, 1, 15, PayoutDay::Day(payout), offset);
            let period = instantiate_period(&t, year, month);
            prop_assert!(period.payout_date.day() <= last_day_of_month(
                period.payout_date.year(),
                period.payout_date.month(),
            ));
        }
    }
}
