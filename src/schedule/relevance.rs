//! Period relevance classification.
//!
//! Labels instantiated periods relative to today and selects the
//! authoritative current period. A well-formed cycle has exactly one
//! current period; zero or several are tolerated and reported rather
//! than treated as failures, because stored period data is not always
//! well-formed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Anomaly, PayPeriod};

/// Where a period sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    /// Today falls inside `[start_date, end_date]` (inclusive).
    Current,
    /// The period starts after today.
    Upcoming,
    /// The period ended before today.
    Past,
}

/// Classifies one period against today, at full-day granularity.
///
/// # Example
///
/// ```
/// use pay_period_engine::models::PayPeriod;
/// use pay_period_engine::schedule::{classify, Relevance};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     department_id: "rec_dept".to_string(),
///     template_ref: None,
///     period_number: 1,
///     start_date: NaiveDate::from_ymd_opt(2025, 11, 11).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 11, 25).unwrap(),
///     payout_date: NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
/// };
///
/// let today = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
/// assert_eq!(classify(&period, today), Relevance::Current);
/// ```
pub fn classify(period: &PayPeriod, today: NaiveDate) -> Relevance {
    if period.contains_date(today) {
        Relevance::Current
    } else if period.start_date > today {
        Relevance::Upcoming
    } else {
        Relevance::Past
    }
}

/// The outcome of current-period selection.
#[derive(Debug, Clone)]
pub struct CurrentSelection {
    /// The selected period, if any period exists at all.
    pub current: Option<PayPeriod>,
    /// Reported when zero or multiple periods contained today.
    pub anomalies: Vec<Anomaly>,
}

/// Selects the authoritative current period from a cycle.
///
/// Exactly one current period is the well-formed case. When several
/// periods contain today, the first in template order wins; when none
/// does but periods exist, the first in template order is selected as a
/// stand-in. Both conditions are reported as anomalies, never as
/// errors.
pub fn select_current(periods: &[PayPeriod], today: NaiveDate) -> CurrentSelection {
    let matches: Vec<&PayPeriod> = periods
        .iter()
        .filter(|p| classify(p, today) == Relevance::Current)
        .collect();

    match matches.as_slice() {
        [] => {
            let Some(first) = periods.first() else {
                return CurrentSelection {
                    current: None,
                    anomalies: Vec::new(),
                };
            };
            warn!(%today, "no period contains today, selecting first in template order");
            CurrentSelection {
                current: Some(first.clone()),
                anomalies: vec![Anomaly::no_current_period()],
            }
        }
        [only] => CurrentSelection {
            current: Some((*only).clone()),
            anomalies: Vec::new(),
        },
        several => {
            warn!(
                %today,
                count = several.len(),
                "multiple periods contain today, selecting first in template order"
            );
            CurrentSelection {
                current: Some(several[0].clone()),
                anomalies: vec![Anomaly::ambiguous_current_period(several.len())],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn period(period_number: u32, start: NaiveDate, end: NaiveDate) -> PayPeriod {
        PayPeriod {
            department_id: "rec_dept".to_string(),
            template_ref: None,
            period_number,
            start_date: start,
            end_date: end,
            payout_date: end,
        }
    }

    fn november_cycle() -> Vec<PayPeriod> {
        vec![
            period(1, date(2025, 11, 11), date(2025, 11, 25)),
            period(2, date(2025, 11, 26), date(2025, 12, 10)),
        ]
    }

    /// RC-001: a day strictly inside the range is current.
    #[test]
    fn test_classify_current_inside_range() {
        let periods = november_cycle();
        assert_eq!(classify(&periods[0], date(2025, 11, 20)), Relevance::Current);
    }

    /// RC-002: bounds are inclusive at day granularity.
    #[test]
    fn test_classify_current_on_bounds() {
        let periods = november_cycle();
        assert_eq!(classify(&periods[0], date(2025, 11, 11)), Relevance::Current);
        assert_eq!(classify(&periods[0], date(2025, 11, 25)), Relevance::Current);
    }

    #[test]
    fn test_classify_upcoming_and_past() {
        let periods = november_cycle();
        assert_eq!(classify(&periods[1], date(2025, 11, 20)), Relevance::Upcoming);
        assert_eq!(classify(&periods[0], date(2025, 12, 1)), Relevance::Past);
    }

    /// RC-003: a well-formed cycle selects exactly the containing period.
    #[test]
    fn test_select_current_unique() {
        let periods = november_cycle();
        let selection = select_current(&periods, date(2025, 11, 30));
        assert!(selection.anomalies.is_empty());
        assert_eq!(selection.current.unwrap().period_number, 2);
    }

    /// RC-004: overlapping periods select the first and report it.
    #[test]
    fn test_select_current_ambiguous() {
        let periods = vec![
            period(1, date(2025, 11, 1), date(2025, 11, 20)),
            period(2, date(2025, 11, 15), date(2025, 11, 30)),
        ];
        let selection = select_current(&periods, date(2025, 11, 18));
        assert_eq!(selection.current.unwrap().period_number, 1);
        assert_eq!(selection.anomalies.len(), 1);
        assert_eq!(selection.anomalies[0].code, "ambiguous_current_period");
    }

    /// RC-005: a gap in the cycle selects the first and reports it.
    #[test]
    fn test_select_current_none_contains_today() {
        let periods = vec![
            period(1, date(2025, 11, 1), date(2025, 11, 10)),
            period(2, date(2025, 11, 20), date(2025, 11, 30)),
        ];
        let selection = select_current(&periods, date(2025, 11, 15));
        assert_eq!(selection.current.unwrap().period_number, 1);
        assert_eq!(selection.anomalies[0].code, "no_current_period");
    }

    #[test]
    fn test_select_current_with_no_periods() {
        let selection = select_current(&[], date(2025, 11, 15));
        assert!(selection.current.is_none());
        assert!(selection.anomalies.is_empty());
    }
}
