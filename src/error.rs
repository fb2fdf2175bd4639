//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! maintaining attendance data, and scoring absences.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// All fallible operations in the engine return this error type. The
/// Bradford scoring core itself is infallible; errors only arise at the
/// boundaries (parsing, configuration, the data store).
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidDate {
///     field: "date".to_string(),
///     value: "2024-13-01".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid date for 'date': 2024-13-01 (expected YYYY-MM-DD)");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A date string was not a valid ISO calendar date.
    #[error("Invalid date for '{field}': {value} (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The field or parameter that carried the date.
        field: String,
        /// The rejected input.
        value: String,
    },

    /// A time-of-day string was not a valid `HH:MM` time.
    #[error("Invalid time for '{field}': {value} (expected HH:MM)")]
    InvalidTime {
        /// The field that carried the time.
        field: String,
        /// The rejected input.
        value: String,
    },

    /// A second attendance record was submitted for the same member and day.
    #[error("Attendance already recorded for member '{member_id}' on {date}")]
    DuplicateAttendance {
        /// The member the record belongs to.
        member_id: String,
        /// The day that already has a record.
        date: NaiveDate,
    },

    /// An entity lookup by id failed.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "Client", "Team member").
        entity: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// The acting user's position does not allow the requested action.
    #[error("Permission denied: {actor} cannot {action}")]
    PermissionDenied {
        /// The position of the acting user.
        actor: String,
        /// A description of the refused action.
        action: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
