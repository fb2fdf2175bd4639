//! HTTP API module for the Attendance Engine.
//!
//! This module provides the REST API endpoints for Bradford scoring, the
//! team overview and attendance entry.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AttendanceRequest, BradfordQuery, BradfordRequest, OverviewQuery, ValidateRequest};
pub use response::{ApiError, ApiErrorResponse, BradfordResponse};
pub use state::AppState;
