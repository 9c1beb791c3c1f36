//! Response types for the Pay Period Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Anomaly, EmployeeHoursSummary, PayPeriod, PayPeriodTemplate};
use crate::schedule::Relevance;

/// Response body for `GET /departments/{id}/templates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesResponse {
    /// The department the templates belong to.
    pub department_id: String,
    /// Active templates, ordered by period number.
    pub templates: Vec<PayPeriodTemplate>,
}

/// A pay period labeled with its relevance to today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledPeriod {
    /// The instantiated period.
    #[serde(flatten)]
    pub period: PayPeriod,
    /// Where the period sits relative to today.
    pub relevance: Relevance,
}

/// Response body for `POST /departments/{id}/periods`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodsResponse {
    /// The department the periods belong to.
    pub department_id: String,
    /// The date the periods were classified against.
    pub today: NaiveDate,
    /// The instantiated cycle, labeled, in template order.
    pub periods: Vec<LabeledPeriod>,
    /// The selected current period, when any period exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<PayPeriod>,
    /// Data-quality conditions recovered while selecting.
    pub anomalies: Vec<Anomaly>,
}

/// Response body for `GET /pay-periods/{id}/hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursResponse {
    /// The pay period's record id.
    pub period_id: String,
    /// The period's start date.
    pub start_date: NaiveDate,
    /// The period's end date.
    pub end_date: NaiveDate,
    /// Number of time cards attached to the period.
    pub time_card_count: usize,
    /// Punches retrieved in range, before linkage filtering.
    pub fetched_count: usize,
    /// Punches that contributed to the totals.
    pub punch_count: usize,
    /// True when the linkage filter matched nothing and all punches in
    /// range were used instead.
    pub used_linkage_fallback: bool,
    /// Per-employee totals, ordered by employee id.
    pub employees: Vec<EmployeeHoursSummary>,
    /// Data-quality conditions recovered during aggregation.
    pub anomalies: Vec<Anomaly>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::StoreRequest { table, detail } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "STORE_ERROR",
                    format!("Record store request failed for table '{table}'"),
                    detail,
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {path}"),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {path}: {message}"),
                ),
            },
            EngineError::PayPeriodNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "PAY_PERIOD_NOT_FOUND",
                    format!("Pay period not found: {id}"),
                    "No pay period record exists with the requested id",
                ),
            },
            EngineError::MissingField {
                table,
                record_id,
                field,
            } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "RECORD_INCOMPLETE",
                    format!("Record '{record_id}' in table '{table}' is missing field '{field}'"),
                    "The stored record cannot be used until the field is populated",
                ),
            },
            EngineError::InvalidDate { field, value } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INVALID_DATE",
                    format!("Invalid date in field '{field}'"),
                    format!("The value '{value}' is not a calendar date"),
                ),
            },
        }
    }
}
