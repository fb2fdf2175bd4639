//! Request types for the Attendance Engine API.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{parse_iso_date, AttendanceRecord, LeaveType};
use crate::store::AttendanceUpdate;

/// Request body for the stateless `/bradford` endpoint.
///
/// Carries a snapshot of attendance records (for one or more members) and
/// asks for the score of one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BradfordRequest {
    /// The member to score.
    pub member_id: String,
    /// Attendance records; records of other members are ignored.
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    /// Window length in months; the configured default when omitted.
    #[serde(default)]
    pub rolling_months: Option<u32>,
    /// Last day of the window; today (UTC) when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl BradfordRequest {
    /// Checks that the snapshot holds at most one record per member and day.
    ///
    /// Returns `DuplicateAttendance` for the first repeated pair.
    pub fn ensure_one_record_per_day(&self) -> EngineResult<()> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !seen.insert((record.member_id.as_str(), record.date)) {
                return Err(EngineError::DuplicateAttendance {
                    member_id: record.member_id.clone(),
                    date: record.date,
                });
            }
        }
        Ok(())
    }
}

/// Query parameters for `GET /members/:id/bradford`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BradfordQuery {
    /// Window length in months.
    pub months: Option<u32>,
    /// Last day of the window, `YYYY-MM-DD`.
    pub as_of: Option<String>,
}

impl BradfordQuery {
    /// Parses the `as_of` parameter, if present.
    pub fn as_of_date(&self) -> EngineResult<Option<NaiveDate>> {
        self.as_of
            .as_deref()
            .map(|value| parse_iso_date("as_of", value))
            .transpose()
    }
}

/// Query parameters for `GET /overview`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewQuery {
    /// The day to report on, `YYYY-MM-DD`; today (UTC) when omitted.
    pub date: Option<String>,
    /// Narrow the roster to one client.
    pub client_id: Option<String>,
    /// Narrow the roster to what this user may see.
    pub user_id: Option<String>,
}

impl OverviewQuery {
    /// Parses the `date` parameter, if present.
    pub fn date(&self) -> EngineResult<Option<NaiveDate>> {
        self.date
            .as_deref()
            .map(|value| parse_iso_date("date", value))
            .transpose()
    }
}

/// Request body for `POST /attendance`.
///
/// Sets whichever fields are present on the member's record for the day,
/// creating the record if needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// The member the entry is for.
    pub member_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// Clock-in time, `HH:MM`.
    #[serde(default, with = "crate::models::clock_time", skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<NaiveTime>,
    /// Clock-out time, `HH:MM`.
    #[serde(default, with = "crate::models::clock_time", skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<NaiveTime>,
    /// Unpaid break minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<u32>,
    /// Leave recorded for the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AttendanceRequest {
    /// Returns true if the request would change nothing.
    pub fn is_empty(&self) -> bool {
        self.clock_in.is_none()
            && self.clock_out.is_none()
            && self.break_minutes.is_none()
            && self.leave_type.is_none()
            && self.notes.is_none()
    }

    /// Converts the provided fields into a store update.
    pub fn to_update(&self) -> AttendanceUpdate {
        AttendanceUpdate {
            clock_in: self.clock_in.map(Some),
            clock_out: self.clock_out.map(Some),
            break_minutes: self.break_minutes,
            leave_type: self.leave_type.map(Some),
            notes: self.notes.clone().map(Some),
        }
    }
}

/// Request body for `POST /attendance/:id/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// The user validating the record.
    pub validator_id: String,
}
