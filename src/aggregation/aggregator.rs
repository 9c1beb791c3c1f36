//! Employee hour roll-ups.
//!
//! Retrieves a period's punches, applies the time-card linkage filter
//! with its documented fallback, and sums hours per employee. Batch
//! behavior throughout: one bad punch degrades to zero hours, only a
//! store failure aborts.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Anomaly, EmployeeHoursSummary, Punch};
use crate::store::{list_all, Filter, Page, RecordStore};

use super::hours::punch_hours;
use super::punch_pager::PunchPager;

/// The outcome of aggregating punches over a date range.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Per-employee totals, ordered by employee id.
    pub summaries: Vec<EmployeeHoursSummary>,
    /// Punches retrieved in the date range, before linkage filtering.
    pub fetched_count: usize,
    /// Punches that contributed to the totals.
    pub punch_count: usize,
    /// True when the time-card linkage filter matched nothing and the
    /// aggregation fell back to all punches in range.
    pub used_linkage_fallback: bool,
    /// Data-quality conditions recovered during aggregation.
    pub anomalies: Vec<Anomaly>,
}

/// Aggregates per-employee hours for an inclusive date range.
///
/// When `time_card_ids` is non-empty, only punches linked to one of the
/// cards are counted — unless that filter matches nothing while punches
/// exist in range, in which case linkage data is assumed stale and every
/// retrieved punch counts (reported via
/// [`AggregationResult::used_linkage_fallback`]).
///
/// Punches without an employee reference cannot be attributed and are
/// dropped. Totals are rounded to 2 decimal places per employee.
pub fn aggregate_employee_hours(
    store: &dyn RecordStore,
    config: &EngineConfig,
    start_date: NaiveDate,
    end_date: NaiveDate,
    time_card_ids: &[String],
) -> EngineResult<AggregationResult> {
    let pager = PunchPager::new(
        store,
        &config.tables.punches,
        start_date,
        end_date,
        config.paging,
    );
    let retrieved = pager.fetch_all()?;

    let mut anomalies = Vec::new();
    if retrieved.ceiling_reached {
        anomalies.push(Anomaly::punch_ceiling_reached(
            retrieved.records.len(),
            pager.ceiling(),
        ));
    }

    let punches: Vec<Punch> = retrieved.records.iter().map(Punch::from_record).collect();
    let fetched_count = punches.len();

    // Linkage filter, with the fallback for stale time-card references.
    let mut used_linkage_fallback = false;
    let selected: Vec<&Punch> = if time_card_ids.is_empty() {
        punches.iter().collect()
    } else {
        let cards: HashSet<&str> = time_card_ids.iter().map(String::as_str).collect();
        let linked: Vec<&Punch> = punches
            .iter()
            .filter(|p| p.time_card_id.as_deref().is_some_and(|id| cards.contains(id)))
            .collect();
        if linked.is_empty() && !punches.is_empty() {
            warn!(
                fetched = fetched_count,
                "no punches linked to time cards, using all punches in range"
            );
            anomalies.push(Anomaly::unlinked_punch_fallback(fetched_count));
            used_linkage_fallback = true;
            punches.iter().collect()
        } else {
            linked
        }
    };

    let mut totals: BTreeMap<String, (Decimal, u32)> = BTreeMap::new();
    let mut punch_count = 0;
    for punch in selected {
        let Some(employee_id) = &punch.employee_id else {
            continue;
        };
        punch_count += 1;

        let computed = punch_hours(punch);
        if let Some(anomaly) = computed.anomaly {
            anomalies.push(anomaly);
        }

        let entry = totals
            .entry(employee_id.clone())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += computed.hours;
        entry.1 += 1;
    }

    let summaries: Vec<EmployeeHoursSummary> = totals
        .into_iter()
        .map(|(employee_id, (hours, count))| {
            let mut total_hours = hours.round_dp(2);
            total_hours.rescale(2);
            EmployeeHoursSummary {
                employee_id,
                total_hours,
                punch_count: count,
            }
        })
        .collect();

    info!(
        employees = summaries.len(),
        punches = punch_count,
        fallback = used_linkage_fallback,
        "aggregated employee hours"
    );

    Ok(AggregationResult {
        summaries,
        fetched_count,
        punch_count,
        used_linkage_fallback,
        anomalies,
    })
}

/// Per-employee hour totals for one stored pay period.
#[derive(Debug, Clone)]
pub struct PeriodHoursReport {
    /// The pay period's record id.
    pub period_id: String,
    /// The period's start date.
    pub start_date: NaiveDate,
    /// The period's end date.
    pub end_date: NaiveDate,
    /// Number of time cards attached to the period.
    pub time_card_count: usize,
    /// The aggregation over the period's date range.
    pub result: AggregationResult,
}

/// Aggregates hours for a pay period stored in the record store.
///
/// Loads the period record for its date bounds, collects the period's
/// time cards, then runs the range aggregation.
pub fn aggregate_period(
    store: &dyn RecordStore,
    config: &EngineConfig,
    period_id: &str,
) -> EngineResult<PeriodHoursReport> {
    let table = &config.tables.pay_periods;
    let filter = Filter::new().within("id", vec![period_id.to_string()]);
    let page = store.list_records(table, &filter, Page::first(1))?;
    let record = page
        .records
        .first()
        .ok_or_else(|| EngineError::PayPeriodNotFound {
            id: period_id.to_string(),
        })?;

    let start_date = record_date(table, record, "start_date")?;
    let end_date = record_date(table, record, "end_date")?;

    let cards_filter = Filter::new().within("pay_period_id", vec![period_id.to_string()]);
    let time_cards = list_all(
        store,
        &config.tables.time_cards,
        &cards_filter,
        config.paging.page_size,
    )?;
    let time_card_ids: Vec<String> = time_cards.iter().map(|tc| tc.id.clone()).collect();

    let result = aggregate_employee_hours(store, config, start_date, end_date, &time_card_ids)?;

    Ok(PeriodHoursReport {
        period_id: period_id.to_string(),
        start_date,
        end_date,
        time_card_count: time_card_ids.len(),
        result,
    })
}

/// Reads a date field, accepting both date-only and datetime text.
fn record_date(
    table: &str,
    record: &crate::store::Record,
    field: &str,
) -> EngineResult<NaiveDate> {
    let raw = record
        .text(field)
        .ok_or_else(|| EngineError::MissingField {
            table: table.to_string(),
            record_id: record.id.clone(),
            field: field.to_string(),
        })?;
    let date_part = raw.split('T').next().unwrap_or(raw);
    date_part
        .parse::<NaiveDate>()
        .map_err(|_| EngineError::InvalidDate {
            field: field.to_string(),
            value: raw.to_string(),
        })
}
