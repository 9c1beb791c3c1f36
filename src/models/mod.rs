//! Core data models for the Pay Period Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod anomaly;
mod department;
mod pay_period;
mod punch;
mod template;

pub use anomaly::Anomaly;
pub use department::Department;
pub use pay_period::PayPeriod;
pub use punch::{EmployeeHoursSummary, Punch, TimeCard};
pub use template::{PayPeriodTemplate, PayoutDay};
