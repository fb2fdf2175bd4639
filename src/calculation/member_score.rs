//! Per-member Bradford assessment over a rolling window.
//!
//! This module ties the extractor and the scorer together for one member:
//! it filters a mixed collection of attendance records down to the member,
//! derives the trailing N-month window, and scores the spells inside it.

use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AbsencePeriod, AttendanceRecord, BradfordScore};

use super::{calculate_bradford_factor, extract_absence_periods};

/// The default rolling window length in months.
pub const DEFAULT_ROLLING_MONTHS: u32 = 12;

/// A closed date range `[start_date, end_date]` that spells are counted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingWindow {
    /// First day of the window (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the window (inclusive).
    pub end_date: NaiveDate,
}

/// Computes the trailing window ending on `as_of`.
///
/// The start is `as_of` minus `months` calendar months. When the target
/// month is shorter, the day is clamped to the month's last day, so
/// 31 March minus one month is 29 February in a leap year.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::rolling_window;
/// use chrono::NaiveDate;
///
/// let window = rolling_window(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(), 12);
/// assert_eq!(window.start_date, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
/// assert_eq!(window.end_date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
/// ```
pub fn rolling_window(as_of: NaiveDate, months: u32) -> RollingWindow {
    let start_date = as_of
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);

    RollingWindow {
        start_date,
        end_date: as_of,
    }
}

/// The full Bradford assessment of one member: the window, the spells found
/// in it, and the resulting score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAssessment {
    /// The member that was assessed.
    pub member_id: String,
    /// The window spells were counted over.
    pub window: RollingWindow,
    /// The spells found in the window, in date order.
    pub periods: Vec<AbsencePeriod>,
    /// The resulting score.
    pub score: BradfordScore,
}

/// Assesses one member over the `rolling_months` ending on `as_of`.
///
/// `all_records` may contain records for any number of members; only those
/// belonging to `member_id` are considered.
pub fn assess_member(
    member_id: &str,
    all_records: &[AttendanceRecord],
    rolling_months: u32,
    as_of: NaiveDate,
) -> MemberAssessment {
    let window = rolling_window(as_of, rolling_months);

    let member_records: Vec<AttendanceRecord> = all_records
        .iter()
        .filter(|r| r.member_id == member_id)
        .cloned()
        .collect();

    let periods = extract_absence_periods(&member_records, window.start_date, window.end_date);
    let score = calculate_bradford_factor(&periods);

    debug!(
        member_id,
        records = member_records.len(),
        spells = score.spells,
        days = score.days,
        score = score.score,
        level = %score.level,
        "Assessed member Bradford Factor"
    );

    MemberAssessment {
        member_id: member_id.to_string(),
        window,
        periods,
        score,
    }
}

/// Scores one member over the `rolling_months` ending on `as_of`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::member_bradford_score_as_of;
/// use attendance_engine::models::{AttendanceRecord, LeaveType};
/// use chrono::NaiveDate;
///
/// let mut record = AttendanceRecord::new("att-1", "tm-3", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
/// record.leave_type = Some(LeaveType::Sick);
/// let mut other = AttendanceRecord::new("att-2", "tm-4", NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
/// other.leave_type = Some(LeaveType::Sick);
///
/// let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let score = member_bradford_score_as_of("tm-3", &[record, other], 12, as_of);
/// assert_eq!(score.spells, 1);
/// assert_eq!(score.score, 1);
/// ```
pub fn member_bradford_score_as_of(
    member_id: &str,
    all_records: &[AttendanceRecord],
    rolling_months: u32,
    as_of: NaiveDate,
) -> BradfordScore {
    assess_member(member_id, all_records, rolling_months, as_of).score
}

/// Scores one member over the `rolling_months` ending today (UTC).
pub fn get_member_bradford_score(
    member_id: &str,
    all_records: &[AttendanceRecord],
    rolling_months: u32,
) -> BradfordScore {
    member_bradford_score_as_of(
        member_id,
        all_records,
        rolling_months,
        Utc::now().date_naive(),
    )
}
