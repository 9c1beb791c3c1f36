//! HTTP request handlers for the Pay Period Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregation::aggregate_period;
use crate::error::EngineResult;
use crate::models::PayPeriodTemplate;
use crate::schedule::{classify, instantiate_cycle, select_current};
use crate::store::{list_all, Filter};

use super::request::PeriodsRequest;
use super::response::{
    ApiError, ApiErrorResponse, HoursResponse, LabeledPeriod, PeriodsResponse, TemplatesResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/departments/:id/templates", get(templates_handler))
        .route("/departments/:id/periods", post(periods_handler))
        .route("/pay-periods/:id/hours", get(hours_handler))
        .with_state(state)
}

/// Loads a department's active templates, ordered by period number.
///
/// The department filter runs client-side: linked-record fields cannot be
/// filtered server-side, and the stored value may be a collection or a
/// bare id.
fn department_templates(
    state: &AppState,
    department_id: &str,
) -> EngineResult<Vec<PayPeriodTemplate>> {
    let config = state.config().config();
    let records = list_all(
        state.store(),
        &config.tables.pay_period_templates,
        &Filter::new(),
        config.paging.page_size,
    )?;

    let mut templates: Vec<PayPeriodTemplate> = records
        .iter()
        .filter(|record| {
            record
                .field("department_id")
                .is_some_and(|v| v.contains_reference(department_id))
        })
        .filter_map(PayPeriodTemplate::from_record)
        .filter(|template| template.is_active)
        .collect();
    templates.sort_by_key(|template| template.period_number);
    Ok(templates)
}

/// Handler for `GET /departments/{id}/templates`.
async fn templates_handler(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, department_id = %department_id, "listing templates");

    match department_templates(&state, &department_id) {
        Ok(templates) => {
            info!(
                correlation_id = %correlation_id,
                count = templates.len(),
                "templates listed"
            );
            Json(TemplatesResponse {
                department_id,
                templates,
            })
            .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "template listing failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /departments/{id}/periods`.
///
/// Instantiates the department's stored templates for the requested
/// anchor month and labels each period relative to today.
async fn periods_handler(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
    payload: Result<Json<PeriodsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "bad periods request");
            let error = match rejection {
                JsonRejection::JsonDataError(err) => ApiError::validation_error(err.body_text()),
                JsonRejection::JsonSyntaxError(err) => {
                    ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    if !(1..=12).contains(&request.month) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiError::validation_error(format!(
                "month must be 1-12, got {}",
                request.month
            ))),
        )
            .into_response();
    }

    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    info!(
        correlation_id = %correlation_id,
        department_id = %department_id,
        year = request.year,
        month = request.month,
        %today,
        "instantiating periods"
    );

    let templates = match department_templates(&state, &department_id) {
        Ok(templates) => templates,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "period instantiation failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let periods = instantiate_cycle(&templates, request.year, request.month);
    let selection = select_current(&periods, today);
    let labeled: Vec<LabeledPeriod> = periods
        .into_iter()
        .map(|period| {
            let relevance = classify(&period, today);
            LabeledPeriod { period, relevance }
        })
        .collect();

    info!(
        correlation_id = %correlation_id,
        periods = labeled.len(),
        current = selection.current.is_some(),
        "periods instantiated"
    );

    Json(PeriodsResponse {
        department_id,
        today,
        periods: labeled,
        current: selection.current,
        anomalies: selection.anomalies,
    })
    .into_response()
}

/// Handler for `GET /pay-periods/{id}/hours`.
async fn hours_handler(
    State(state): State<AppState>,
    Path(period_id): Path<String>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_id = %period_id, "aggregating hours");

    let config = state.config().config();
    match aggregate_period(state.store(), config, &period_id) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employees = report.result.summaries.len(),
                punches = report.result.punch_count,
                fallback = report.result.used_linkage_fallback,
                "hours aggregated"
            );
            Json(HoursResponse {
                period_id: report.period_id,
                start_date: report.start_date,
                end_date: report.end_date,
                time_card_count: report.time_card_count,
                fetched_count: report.result.fetched_count,
                punch_count: report.result.punch_count,
                used_linkage_fallback: report.result.used_linkage_fallback,
                employees: report.result.summaries,
                anomalies: report.result.anomalies,
            })
            .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "hour aggregation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
