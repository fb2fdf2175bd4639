//! Worked hours for a single attendance day.

use rust_decimal::Decimal;

use crate::models::AttendanceRecord;

/// Calculates the hours worked on an attendance day.
///
/// Worked hours are the time between clock-in and clock-out less the
/// recorded break minutes. Days missing either clock time count as zero,
/// and the result never goes below zero (a clock-out before the clock-in
/// also yields zero).
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calculate_worked_hours;
/// use attendance_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let mut record = AttendanceRecord::new("att-1", "tm-1", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
/// record.clock_in = NaiveTime::from_hms_opt(9, 0, 0);
/// record.clock_out = NaiveTime::from_hms_opt(17, 0, 0);
/// record.break_minutes = 30;
///
/// assert_eq!(calculate_worked_hours(&record), Decimal::new(75, 1)); // 7.5 hours
/// ```
pub fn calculate_worked_hours(record: &AttendanceRecord) -> Decimal {
    let (Some(clock_in), Some(clock_out)) = (record.clock_in, record.clock_out) else {
        return Decimal::ZERO;
    };

    let worked_minutes =
        (clock_out - clock_in).num_minutes() - i64::from(record.break_minutes);

    if worked_minutes <= 0 {
        return Decimal::ZERO;
    }

    Decimal::new(worked_minutes, 0) / Decimal::new(60, 0)
}

/// Sums worked hours over a set of records.
pub fn total_worked_hours<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records.into_iter().map(calculate_worked_hours).sum()
}
