//! Response types for the Attendance Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::MemberAssessment;
use crate::error::EngineError;
use crate::models::{AbsencePeriod, BradfordScore};

/// Response body for the Bradford endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BradfordResponse {
    /// The member that was scored.
    pub member_id: String,
    /// First day of the rolling window (inclusive).
    pub window_start: NaiveDate,
    /// Last day of the rolling window (inclusive).
    pub window_end: NaiveDate,
    /// Absence spells found in the window.
    pub periods: Vec<AbsencePeriod>,
    /// The Bradford score and its classification.
    pub score: BradfordScore,
    /// The score's breakdown, e.g. `2² × 8 = 32`.
    pub formula: String,
}

impl From<MemberAssessment> for BradfordResponse {
    fn from(assessment: MemberAssessment) -> Self {
        Self {
            member_id: assessment.member_id,
            window_start: assessment.window.start_date,
            window_end: assessment.window.end_date,
            formula: assessment.score.formula(),
            periods: assessment.periods,
            score: assessment.score,
        }
    }
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
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidDate { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_DATE",
                    message,
                    format!("The '{}' value must be a calendar date in YYYY-MM-DD form", field),
                ),
            ),
            EngineError::InvalidTime { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_TIME",
                    message,
                    format!("The '{}' value must be a time in HH:MM form", field),
                ),
            ),
            EngineError::DuplicateAttendance { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("DUPLICATE_ATTENDANCE", message),
            },
            EngineError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", message),
            },
            EngineError::PermissionDenied { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("PERMISSION_DENIED", message),
            },
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                // serde's message carries the offending field
                let body_text = err.body_text();
                if body_text.contains("missing field") {
                    ApiError::validation_error(body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        ApiErrorResponse::bad_request(error)
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::assess_member;
    use crate::models::{AttendanceRecord, LeaveType};

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response: ApiErrorResponse = EngineError::NotFound {
            entity: "Team member",
            id: "tm-9".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "NOT_FOUND");
        assert_eq!(response.error.message, "Team member not found: tm-9");
    }

    #[test]
    fn test_invalid_date_maps_to_400() {
        let response: ApiErrorResponse = EngineError::InvalidDate {
            field: "as_of".to_string(),
            value: "tomorrow".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_DATE");
    }

    #[test]
    fn test_duplicate_attendance_maps_to_409() {
        let response: ApiErrorResponse = EngineError::DuplicateAttendance {
            member_id: "tm-3".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "DUPLICATE_ATTENDANCE");
    }

    #[test]
    fn test_permission_denied_maps_to_403() {
        let response: ApiErrorResponse = EngineError::PermissionDenied {
            actor: "Medical Biller".to_string(),
            action: "manage a Team Lead".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let response: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "engine.yaml".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_bradford_response_flattens_window() {
        let mut record =
            AttendanceRecord::new("att-1", "tm-3", NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        record.leave_type = Some(LeaveType::Sick);
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        let response: BradfordResponse = assess_member("tm-3", &[record], 12, as_of).into();

        assert_eq!(response.window_start, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap());
        assert_eq!(response.window_end, as_of);
        assert_eq!(response.periods.len(), 1);
        assert_eq!(response.score.score, 1);
        assert_eq!(response.formula, "1² × 1 = 1");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["window_start"], "2023-06-30");
        assert_eq!(json["periods"][0]["type"], "sick");
    }
}
