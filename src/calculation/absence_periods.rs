//! Absence spell extraction.
//!
//! This module groups one member's qualifying absence days into contiguous
//! spells. A spell is a run of consecutive calendar days that all carry the
//! same qualifying leave type (sick or unpaid) and have no clock-in.

use chrono::{Days, NaiveDate};

use crate::models::{AbsencePeriod, AbsenceType, AttendanceRecord};

/// Extracts absence spells from a member's attendance records.
///
/// Records are kept if their date lies within `start_date..=end_date`, their
/// leave type is sick or unpaid, and they have no clock-in. The survivors are
/// sorted by date and walked once: a record extends the current spell only if
/// it falls exactly one day after the spell's end and carries the same leave
/// type. Anything else closes the spell and opens a new one.
///
/// # Arguments
///
/// * `records` - Attendance records for a single member, in any order.
///   The caller is responsible for filtering by member.
/// * `start_date` - First day of the window (inclusive)
/// * `end_date` - Last day of the window (inclusive)
///
/// # Returns
///
/// The spells in ascending order of `start_date`. An empty vector is returned
/// when nothing qualifies, including when `start_date > end_date`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::extract_absence_periods;
/// use attendance_engine::models::{AttendanceRecord, LeaveType};
/// use chrono::NaiveDate;
///
/// let sick = |id: &str, day: u32| {
///     let mut record = AttendanceRecord::new(id, "tm-3", NaiveDate::from_ymd_opt(2024, 1, day).unwrap());
///     record.leave_type = Some(LeaveType::Sick);
///     record
/// };
/// let records = vec![sick("a", 4), sick("b", 1), sick("c", 2)];
///
/// let periods = extract_absence_periods(
///     &records,
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// );
/// assert_eq!(periods.len(), 2);
/// assert_eq!(periods[0].days, 2);
/// assert_eq!(periods[1].days, 1);
/// ```
pub fn extract_absence_periods(
    records: &[AttendanceRecord],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<AbsencePeriod> {
    let mut absence_days: Vec<(NaiveDate, AbsenceType)> = records
        .iter()
        .filter(|r| r.date >= start_date && r.date <= end_date && r.is_absence_day())
        .filter_map(|r| {
            r.leave_type
                .and_then(AbsenceType::from_leave_type)
                .map(|absence_type| (r.date, absence_type))
        })
        .collect();

    absence_days.sort_by_key(|(date, _)| *date);

    let mut periods = Vec::new();
    let mut current: Option<AbsencePeriod> = None;

    for (date, absence_type) in absence_days {
        if let Some(period) = current.as_mut() {
            if extends(period, date, absence_type) {
                period.end_date = date;
                period.days += 1;
                continue;
            }
        }

        if let Some(done) = current.replace(AbsencePeriod::single_day(date, absence_type)) {
            periods.push(done);
        }
    }

    periods.extend(current);
    periods
}

/// Returns true if `date` is the day after the period ends and has the same type.
fn extends(period: &AbsencePeriod, date: NaiveDate, absence_type: AbsenceType) -> bool {
    period.absence_type == absence_type
        && period.end_date.checked_add_days(Days::new(1)) == Some(date)
}
