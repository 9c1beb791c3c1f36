//! Per-punch hour computation.
//!
//! A punch's hours come from its precomputed `duration` when that is a
//! valid positive number, otherwise from the difference between its
//! timestamps. Missing timestamps contribute zero; unparseable ones
//! contribute zero and are flagged. Every per-punch value is clamped to
//! `[0, 24]` hours to absorb clock skew and missing punch-outs.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::models::{Anomaly, Punch};

/// The hours contributed by one punch, plus any flagged condition.
#[derive(Debug, Clone)]
pub struct PunchHours {
    /// Clamped, non-negative hours.
    pub hours: Decimal,
    /// Set when a timestamp was present but unparseable.
    pub anomaly: Option<Anomaly>,
}

impl PunchHours {
    fn zero() -> Self {
        Self {
            hours: Decimal::ZERO,
            anomaly: None,
        }
    }

    fn flagged(anomaly: Anomaly) -> Self {
        Self {
            hours: Decimal::ZERO,
            anomaly: Some(anomaly),
        }
    }
}

/// Parses a store timestamp.
///
/// Accepts RFC 3339 (the store's native form, `Z` suffix included) and
/// bare naive datetimes, which older clock firmware uploads; those are
/// taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn clamp(hours: Decimal) -> Decimal {
    hours.max(Decimal::ZERO).min(Decimal::from(24))
}

/// Computes the hours contributed by a single punch.
///
/// # Example
///
/// ```
/// use pay_period_engine::aggregation::punch_hours;
/// use pay_period_engine::models::Punch;
/// use rust_decimal::Decimal;
///
/// let punch = Punch {
///     id: "rec_p1".to_string(),
///     employee_id: Some("rec_emp".to_string()),
///     client_id: None,
///     time_card_id: None,
///     punch_in_time: Some("2025-11-12T09:00:00Z".to_string()),
///     punch_out_time: Some("2025-11-12T12:30:00Z".to_string()),
///     duration: None,
/// };
/// assert_eq!(punch_hours(&punch).hours, Decimal::new(35, 1)); // 3.5
/// ```
pub fn punch_hours(punch: &Punch) -> PunchHours {
    // A valid positive precomputed duration wins.
    if let Some(duration) = punch.duration {
        if duration.is_finite() && duration > 0.0 {
            if let Some(hours) = Decimal::from_f64(duration) {
                return PunchHours {
                    hours: clamp(hours),
                    anomaly: None,
                };
            }
        }
    }

    let (Some(raw_in), Some(raw_out)) = (&punch.punch_in_time, &punch.punch_out_time) else {
        return PunchHours::zero();
    };

    let Some(clock_in) = parse_timestamp(raw_in) else {
        return PunchHours::flagged(Anomaly::unparseable_timestamp(&punch.id, raw_in));
    };
    let Some(clock_out) = parse_timestamp(raw_out) else {
        return PunchHours::flagged(Anomaly::unparseable_timestamp(&punch.id, raw_out));
    };

    let seconds = (clock_out - clock_in).num_seconds();
    let hours = Decimal::from(seconds) / Decimal::from(3600);
    PunchHours {
        hours: clamp(hours),
        anomaly: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn punch(punch_in: Option<&str>, punch_out: Option<&str>, duration: Option<f64>) -> Punch {
        Punch {
            id: "rec_p1".to_string(),
            employee_id: Some("rec_emp".to_string()),
            client_id: None,
            time_card_id: None,
            punch_in_time: punch_in.map(str::to_string),
            punch_out_time: punch_out.map(str::to_string),
            duration,
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    /// PH-001: duration wins when present and positive.
    #[test]
    fn test_duration_takes_precedence() {
        let p = punch(
            Some("2025-11-12T09:00:00Z"),
            Some("2025-11-12T17:00:00Z"),
            Some(2.25),
        );
        assert_eq!(punch_hours(&p).hours, dec("2.25"));
    }

    /// PH-002: timestamps are used when duration is absent.
    #[test]
    fn test_hours_from_timestamps() {
        let p = punch(Some("2025-11-12T09:00:00Z"), Some("2025-11-12T11:00:00Z"), None);
        assert_eq!(punch_hours(&p).hours, dec("2"));

        let p = punch(Some("2025-11-12T09:00:00Z"), Some("2025-11-12T12:30:00Z"), None);
        assert_eq!(punch_hours(&p).hours, dec("3.5"));
    }

    /// PH-003: non-positive or bad durations fall through to timestamps.
    #[test]
    fn test_invalid_duration_falls_through() {
        let p = punch(Some("2025-11-12T09:00:00Z"), Some("2025-11-12T11:00:00Z"), Some(0.0));
        assert_eq!(punch_hours(&p).hours, dec("2"));

        let p = punch(Some("2025-11-12T09:00:00Z"), Some("2025-11-12T11:00:00Z"), Some(-3.0));
        assert_eq!(punch_hours(&p).hours, dec("2"));

        let p = punch(
            Some("2025-11-12T09:00:00Z"),
            Some("2025-11-12T11:00:00Z"),
            Some(f64::NAN),
        );
        assert_eq!(punch_hours(&p).hours, dec("2"));
    }

    /// PH-004: a missing punch-out contributes zero without a flag.
    #[test]
    fn test_missing_punch_out_is_zero() {
        let result = punch_hours(&punch(Some("2025-11-12T09:00:00Z"), None, None));
        assert_eq!(result.hours, Decimal::ZERO);
        assert!(result.anomaly.is_none());
    }

    /// PH-005: an unparseable timestamp contributes zero and is flagged.
    #[test]
    fn test_unparseable_timestamp_is_flagged() {
        let result = punch_hours(&punch(Some("yesterday-ish"), Some("2025-11-12T11:00:00Z"), None));
        assert_eq!(result.hours, Decimal::ZERO);
        let anomaly = result.anomaly.unwrap();
        assert_eq!(anomaly.code, "unparseable_timestamp");
        assert!(anomaly.message.contains("yesterday-ish"));
    }

    /// PH-006: values clamp to [0, 24].
    #[test]
    fn test_clamping() {
        // Punch-out before punch-in (clock skew): clamp to zero.
        let p = punch(Some("2025-11-12T11:00:00Z"), Some("2025-11-12T09:00:00Z"), None);
        assert_eq!(punch_hours(&p).hours, Decimal::ZERO);

        // Forgotten punch-out closed days later: clamp to 24.
        let p = punch(Some("2025-11-12T09:00:00Z"), Some("2025-11-15T09:00:00Z"), None);
        assert_eq!(punch_hours(&p).hours, dec("24"));

        // Oversized stored duration clamps too.
        let p = punch(None, None, Some(40.0));
        assert_eq!(punch_hours(&p).hours, dec("24"));
    }

    #[test]
    fn test_parse_timestamp_accepts_naive_datetimes() {
        assert!(parse_timestamp("2025-11-12T09:00:00Z").is_some());
        assert!(parse_timestamp("2025-11-12T09:00:00+02:00").is_some());
        assert!(parse_timestamp("2025-11-12T09:00:00").is_some());
        assert!(parse_timestamp("2025-11-12 09:00").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_offset_aware_difference() {
        let p = punch(
            Some("2025-11-12T09:00:00+02:00"),
            Some("2025-11-12T09:00:00Z"),
            None,
        );
        // 09:00+02:00 is 07:00 UTC, so the difference is two hours.
        assert_eq!(punch_hours(&p).hours, dec("2"));
    }
}
