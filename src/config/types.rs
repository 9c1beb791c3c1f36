//! Configuration types for the Pay Period Engine.

use serde::{Deserialize, Serialize};

/// Record-store table names.
///
/// Deployments address tables by opaque ids rather than names, so every
/// table the engine touches is configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// The departments table.
    #[serde(default = "defaults::departments")]
    pub departments: String,
    /// The pay period templates table.
    #[serde(default = "defaults::pay_period_templates")]
    pub pay_period_templates: String,
    /// The instantiated pay periods table.
    #[serde(default = "defaults::pay_periods")]
    pub pay_periods: String,
    /// The time cards table.
    #[serde(default = "defaults::time_cards")]
    pub time_cards: String,
    /// The punches table.
    #[serde(default = "defaults::punches")]
    pub punches: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            departments: defaults::departments(),
            pay_period_templates: defaults::pay_period_templates(),
            pay_periods: defaults::pay_periods(),
            time_cards: defaults::time_cards(),
            punches: defaults::punches(),
        }
    }
}

/// Paging policy for record retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Records requested per page. The remote contract caps pages at
    /// 2000 records.
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,
    /// Hard ceiling on total punches retrieved for one aggregation.
    /// Reaching it stops paging and is reported, never silent.
    #[serde(default = "defaults::max_punches")]
    pub max_punches: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            max_punches: defaults::max_punches(),
        }
    }
}

/// The engine's complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Table names.
    #[serde(default)]
    pub tables: TableConfig,
    /// Paging policy.
    #[serde(default)]
    pub paging: PagingConfig,
}

mod defaults {
    pub fn departments() -> String {
        "departments".to_string()
    }
    pub fn pay_period_templates() -> String {
        "pay_period_templates".to_string()
    }
    pub fn pay_periods() -> String {
        "pay_periods".to_string()
    }
    pub fn time_cards() -> String {
        "time_cards".to_string()
    }
    pub fn punches() -> String {
        "punches".to_string()
    }
    pub fn page_size() -> usize {
        2000
    }
    pub fn max_punches() -> usize {
        10_000
    }
}
