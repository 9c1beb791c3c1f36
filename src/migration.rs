//! Template migration and repair.
//!
//! Departments originally carried their pay-period configuration as raw
//! day-list text. This module persists the resolver's output as template
//! records, once per department, and repairs historical records whose
//! day pairing predates the resolver. Templates are never deleted here;
//! corrections go through `update_record` and retirement is a matter of
//! clearing `is_active`.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{Anomaly, Department, PayPeriodTemplate};
use crate::schedule::resolve_templates;
use crate::store::{list_all, FieldValue, Fields, Filter, Record, RecordStore};

/// The outcome of one migration run.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    /// Template records created.
    pub created: usize,
    /// Departments skipped because they already had templates.
    pub skipped_existing: usize,
    /// Departments skipped for missing configuration.
    pub skipped_unconfigured: usize,
    /// Data-quality conditions recovered during resolution.
    pub anomalies: Vec<Anomaly>,
}

/// The outcome of one repair run.
#[derive(Debug, Clone, Default)]
pub struct RepairReport {
    /// Template records whose day pairing was corrected.
    pub updated: usize,
    /// Template records already correct.
    pub unchanged: usize,
    /// Data-quality conditions recovered during re-resolution.
    pub anomalies: Vec<Anomaly>,
}

/// Groups stored template records by their department reference.
fn templates_by_department(records: &[Record]) -> HashMap<String, Vec<&Record>> {
    let mut grouped: HashMap<String, Vec<&Record>> = HashMap::new();
    for record in records {
        if let Some(department_id) = record.reference("department_id") {
            grouped
                .entry(department_id.to_string())
                .or_default()
                .push(record);
        }
    }
    grouped
}

/// Persists resolved templates for every department that has none yet.
///
/// Departments that already have template records are left untouched, so
/// the migration is idempotent. Departments without a pay-period type or
/// without usable day lists are skipped and reported.
pub fn migrate_department_templates(
    store: &dyn RecordStore,
    config: &EngineConfig,
) -> EngineResult<MigrationReport> {
    let page_size = config.paging.page_size;
    let departments = list_all(store, &config.tables.departments, &Filter::new(), page_size)?;
    let existing = list_all(
        store,
        &config.tables.pay_period_templates,
        &Filter::new(),
        page_size,
    )?;
    let existing_by_department = templates_by_department(&existing);

    let mut report = MigrationReport::default();

    for record in &departments {
        let department = Department::from_record(record);

        if let Some(templates) = existing_by_department.get(&department.id) {
            info!(
                department_id = %department.id,
                existing = templates.len(),
                "department already has templates, skipping"
            );
            report.skipped_existing += 1;
            continue;
        }

        if department.pay_period_type.is_none() {
            warn!(department_id = %department.id, "department has no pay period type, skipping");
            report.skipped_unconfigured += 1;
            continue;
        }

        let resolved = resolve_templates(&department);
        if resolved.templates.is_empty() {
            report.skipped_unconfigured += 1;
            report.anomalies.extend(resolved.anomalies);
            continue;
        }
        report.anomalies.extend(resolved.anomalies);

        for template in &resolved.templates {
            store.create_record(&config.tables.pay_period_templates, template.to_fields())?;
            report.created += 1;
        }
        info!(
            department_id = %department.id,
            templates = resolved.templates.len(),
            "migrated department templates"
        );
    }

    Ok(report)
}

/// Corrects stored templates whose day pairing disagrees with resolution.
///
/// Early migrations paired start and end days positionally, which breaks
/// for month-spanning cycles. This re-resolves each department's raw day
/// lists and patches `start_day`/`end_day` on any stored template that
/// disagrees. Payout fields are left alone; stored payout data may
/// encode department-specific exceptions.
pub fn repair_templates(
    store: &dyn RecordStore,
    config: &EngineConfig,
) -> EngineResult<RepairReport> {
    let page_size = config.paging.page_size;
    let departments = list_all(store, &config.tables.departments, &Filter::new(), page_size)?;
    let stored = list_all(
        store,
        &config.tables.pay_period_templates,
        &Filter::new(),
        page_size,
    )?;
    let stored_by_department = templates_by_department(&stored);

    let mut report = RepairReport::default();

    for record in &departments {
        let department = Department::from_record(record);
        let Some(stored_templates) = stored_by_department.get(&department.id) else {
            continue;
        };

        let resolved = resolve_templates(&department);
        report.anomalies.extend(resolved.anomalies);
        let expected: HashMap<u32, &PayPeriodTemplate> = resolved
            .templates
            .iter()
            .map(|t| (t.period_number, t))
            .collect();

        for stored_record in stored_templates {
            let Some(stored_template) = PayPeriodTemplate::from_record(stored_record) else {
                warn!(
                    record_id = %stored_record.id,
                    "stored template is missing its day pairing, leaving as-is"
                );
                continue;
            };
            let Some(expected_template) = expected.get(&stored_template.period_number) else {
                continue;
            };

            if stored_template.start_day == expected_template.start_day
                && stored_template.end_day == expected_template.end_day
            {
                report.unchanged += 1;
                continue;
            }

            let mut fix = Fields::new();
            fix.insert(
                "start_day".to_string(),
                FieldValue::from(expected_template.start_day),
            );
            fix.insert(
                "end_day".to_string(),
                FieldValue::from(expected_template.end_day),
            );
            store.update_record(&config.tables.pay_period_templates, &stored_record.id, fix)?;
            info!(
                record_id = %stored_record.id,
                period_number = stored_template.period_number,
                start_day = expected_template.start_day,
                end_day = expected_template.end_day,
                "repaired template day pairing"
            );
            report.updated += 1;
        }
    }

    Ok(report)
}
