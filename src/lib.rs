//! Pay Period Engine
//!
//! This crate computes payroll pay-periods from compact department
//! configuration and aggregates raw time-clock punches into per-employee
//! hour totals. Departments describe a repeating monthly cycle as short
//! day lists (e.g. start days "11, 26" and end days "10, 25"); the engine
//! resolves those lists into templates, instantiates them against real
//! calendar months, and rolls punches up into hours per employee.
//!
//! All record access goes through the [`store::RecordStore`] capability;
//! the engine itself never talks to a concrete backend.

#![warn(missing_docs)]

pub mod aggregation;
pub mod api;
pub mod config;
pub mod error;
pub mod migration;
pub mod models;
pub mod schedule;
pub mod store;
