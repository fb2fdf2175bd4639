//! Attendance record model and related types.
//!
//! This module defines the [`AttendanceRecord`] struct and [`LeaveType`] enum
//! for representing one employee's attendance on one calendar day, together
//! with the boundary parsers for ISO dates and `HH:MM` clock times.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of leave recorded against an attendance day.
///
/// Values the engine does not recognise deserialize to [`LeaveType::Unknown`]
/// and are treated like any other non-qualifying leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Explicitly no leave.
    None,
    /// Sick leave.
    Sick,
    /// Planned vacation.
    Vacation,
    /// Public or company holiday.
    Holiday,
    /// Unpaid leave.
    Unpaid,
    /// Any value not listed above.
    #[serde(other)]
    Unknown,
}

impl LeaveType {
    /// Returns true if this leave type counts towards the Bradford Factor.
    ///
    /// Only sick and unpaid leave form absence spells.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::LeaveType;
    ///
    /// assert!(LeaveType::Sick.is_bradford_qualifying());
    /// assert!(LeaveType::Unpaid.is_bradford_qualifying());
    /// assert!(!LeaveType::Vacation.is_bradford_qualifying());
    /// ```
    pub fn is_bradford_qualifying(self) -> bool {
        matches!(self, LeaveType::Sick | LeaveType::Unpaid)
    }
}

/// One calendar day's attendance entry for one team member.
///
/// At most one record exists per member per date; the
/// [`DataStore`](crate::store::DataStore) enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The team member this record belongs to.
    pub member_id: String,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// Time the member clocked in, if they were present.
    #[serde(default, with = "clock_time", skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<NaiveTime>,
    /// Time the member clocked out.
    #[serde(default, with = "clock_time", skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<NaiveTime>,
    /// Unpaid break minutes taken during the day.
    #[serde(default)]
    pub break_minutes: u32,
    /// The leave recorded for the day, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// The user who validated the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_by: Option<String>,
    /// When the record was validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    /// Creates an empty record for a member on a date.
    pub fn new(id: impl Into<String>, member_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            member_id: member_id.into(),
            date,
            clock_in: None,
            clock_out: None,
            break_minutes: 0,
            leave_type: None,
            notes: None,
            validated_by: None,
            validated_at: None,
        }
    }

    /// Returns true if the member clocked in and is not on leave.
    pub fn is_present(&self) -> bool {
        self.clock_in.is_some() && !self.is_on_leave()
    }

    /// Returns true if any leave other than `none` is recorded.
    pub fn is_on_leave(&self) -> bool {
        self.leave_type.is_some_and(|leave| leave != LeaveType::None)
    }

    /// Returns true if this day can be part of an absence spell.
    ///
    /// A qualifying leave type is not enough: any clock-in marks the day as
    /// (at least partly) worked.
    pub fn is_absence_day(&self) -> bool {
        self.clock_in.is_none()
            && self
                .leave_type
                .is_some_and(LeaveType::is_bradford_qualifying)
    }

    /// Returns true if a user has validated the record.
    pub fn is_validated(&self) -> bool {
        self.validated_by.is_some()
    }
}

/// Parses an ISO `YYYY-MM-DD` date, naming the field on failure.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::parse_iso_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_iso_date("date", "2024-01-02").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
/// );
/// assert!(parse_iso_date("date", "2024-02-30").is_err());
/// ```
pub fn parse_iso_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| EngineError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parses a clock time in `HH:MM` (or `HH:MM:SS`) form.
pub fn parse_clock_time(field: &str, value: &str) -> EngineResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidTime {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Serde adapter for optional `HH:MM` clock times.
///
/// Empty strings are read as "not clocked".
pub(crate) mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => super::parse_clock_time("clock time", value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
