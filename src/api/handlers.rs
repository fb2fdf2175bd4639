//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::{ensure_can_manage, visible_members};
use crate::calculation::{assess_member, build_team_overview};
use crate::models::TeamMember;

use super::request::{
    AttendanceRequest, BradfordQuery, BradfordRequest, OverviewQuery, ValidateRequest,
};
use super::response::{ApiError, ApiErrorResponse, BradfordResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/bradford", post(bradford_handler))
        .route("/members/:id/bradford", get(member_bradford_handler))
        .route("/overview", get(overview_handler))
        .route("/attendance", post(attendance_handler))
        .route("/attendance/:id/validate", post(validate_handler))
        .with_state(state)
}

/// Handler for POST /bradford endpoint.
///
/// Scores a member over the records supplied in the request body. The store
/// is not consulted.
async fn bradford_handler(
    State(state): State<AppState>,
    payload: Result<Json<BradfordRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing Bradford request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(correlation_id, rejection),
    };

    if let Err(err) = request.ensure_one_record_per_day() {
        return reject(correlation_id, err);
    }

    let months = match rolling_months(request.rolling_months, &state) {
        Ok(months) => months,
        Err(err) => return reject(correlation_id, err),
    };
    let as_of = request.as_of.unwrap_or_else(today);

    let start_time = Instant::now();
    let assessment = assess_member(&request.member_id, &request.records, months, as_of);
    info!(
        correlation_id = %correlation_id,
        member_id = %assessment.member_id,
        records = request.records.len(),
        score = assessment.score.score,
        level = %assessment.score.level,
        duration_us = start_time.elapsed().as_micros(),
        "Bradford score calculated"
    );

    json_response(StatusCode::OK, BradfordResponse::from(assessment))
}

/// Handler for GET /members/:id/bradford endpoint.
///
/// Scores a stored member over the stored attendance history.
async fn member_bradford_handler(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    query: Result<Query<BradfordQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, member_id = %member_id, "Processing member Bradford request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return reject(correlation_id, rejection),
    };
    let months = match rolling_months(query.months, &state) {
        Ok(months) => months,
        Err(err) => return reject(correlation_id, err),
    };
    let as_of = match query.as_of_date() {
        Ok(date) => date.unwrap_or_else(today),
        Err(err) => return reject(correlation_id, err),
    };

    let store = state.store().read().await;
    if let Err(err) = store.team_member(&member_id) {
        return reject(correlation_id, err);
    }

    let start_time = Instant::now();
    let assessment = assess_member(&member_id, store.attendance(), months, as_of);
    info!(
        correlation_id = %correlation_id,
        member_id = %member_id,
        score = assessment.score.score,
        level = %assessment.score.level,
        duration_us = start_time.elapsed().as_micros(),
        "Bradford score calculated"
    );

    json_response(StatusCode::OK, BradfordResponse::from(assessment))
}

/// Handler for GET /overview endpoint.
///
/// Reports the day's attendance and the Bradford summary for the roster,
/// narrowed to a client and to what a user may see when those are given.
async fn overview_handler(
    State(state): State<AppState>,
    query: Result<Query<OverviewQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overview request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return reject(correlation_id, rejection),
    };
    let date = match query.date() {
        Ok(date) => date.unwrap_or_else(today),
        Err(err) => return reject(correlation_id, err),
    };

    let store = state.store().read().await;
    let client_filter = query.client_id.as_deref();

    let roster: Vec<TeamMember> = match query.user_id.as_deref() {
        Some(user_id) => {
            let user = match store.user(user_id) {
                Ok(user) => user,
                Err(err) => return reject(correlation_id, err),
            };
            visible_members(user, store.clients(), store.team_members(), client_filter)
                .into_iter()
                .cloned()
                .collect()
        }
        None => {
            let mut members: Vec<TeamMember> = store
                .team_members()
                .iter()
                .filter(|m| m.active)
                .filter(|m| client_filter.is_none_or(|id| m.client_id == id))
                .cloned()
                .collect();
            members.sort_by(|a, b| a.name.cmp(&b.name));
            members
        }
    };

    let start_time = Instant::now();
    let overview = build_team_overview(&roster, store.attendance(), date, state.rolling_months());
    info!(
        correlation_id = %correlation_id,
        date = %date,
        members = overview.total_members,
        present = overview.present,
        high_risk = overview.bradford.high_risk,
        duration_us = start_time.elapsed().as_micros(),
        "Overview built"
    );

    json_response(StatusCode::OK, overview)
}

/// Handler for POST /attendance endpoint.
///
/// Sets the provided fields on the member's record for the day, creating it
/// when the day has none.
async fn attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance entry");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(correlation_id, rejection),
    };
    if request.is_empty() {
        return reject(
            correlation_id,
            ApiErrorResponse::bad_request(ApiError::validation_error(
                "Attendance entry must set at least one field",
            )),
        );
    }

    let mut store = state.store().write().await;
    match store.upsert_attendance(&request.member_id, request.date, request.to_update()) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %record.id,
                member_id = %record.member_id,
                date = %record.date,
                "Attendance recorded"
            );
            json_response(StatusCode::OK, record)
        }
        Err(err) => reject(correlation_id, err),
    }
}

/// Handler for POST /attendance/:id/validate endpoint.
///
/// The validator must hold a position that can manage the member's position.
async fn validate_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, record_id = %record_id, "Processing validation");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(correlation_id, rejection),
    };

    let mut store = state.store().write().await;
    let permitted = store.attendance_record(&record_id).and_then(|record| {
        let member = store.team_member(&record.member_id)?;
        let validator = store.user(&request.validator_id)?;
        ensure_can_manage(validator.position, member.position)
    });
    if let Err(err) = permitted {
        return reject(correlation_id, err);
    }

    match store.validate_attendance(&record_id, &request.validator_id, Utc::now()) {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => reject(correlation_id, err),
    }
}

/// Resolves the requested window length, falling back to the configured one.
fn rolling_months(requested: Option<u32>, state: &AppState) -> Result<u32, ApiErrorResponse> {
    match requested {
        Some(0) => Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "Rolling window must be at least one month",
        ))),
        Some(months) => Ok(months),
        None => Ok(state.rolling_months()),
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Logs a failed request and renders its error body.
fn reject(correlation_id: Uuid, error: impl Into<ApiErrorResponse>) -> Response {
    let response: ApiErrorResponse = error.into();
    warn!(
        correlation_id = %correlation_id,
        status = response.status.as_u16(),
        code = %response.error.code,
        error = %response.error.message,
        "Request failed"
    );
    response.into_response()
}
