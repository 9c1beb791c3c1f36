//! HTTP API module for the Pay Period Engine.
//!
//! This module provides the REST API endpoints for resolving a
//! department's templates, instantiating pay periods, and reporting
//! per-employee hours.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PeriodsRequest;
pub use response::{ApiError, HoursResponse, LabeledPeriod, PeriodsResponse, TemplatesResponse};
pub use state::AppState;
