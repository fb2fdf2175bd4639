//! Bradford Factor scoring.
//!
//! The Bradford Factor is `S² × D`, where `S` is the number of absence spells
//! and `D` the total number of days absent. Squaring the spell count weights
//! frequent short absences more heavily than a single long one.

use crate::models::{AbsencePeriod, BradfordLevel, BradfordScore};

/// Scores below this are [`BradfordLevel::Low`].
pub const LOW_THRESHOLD: u64 = 50;

/// Scores below this (and at least [`LOW_THRESHOLD`]) are [`BradfordLevel::Medium`].
pub const MEDIUM_THRESHOLD: u64 = 125;

/// Scores below this (and at least [`MEDIUM_THRESHOLD`]) are [`BradfordLevel::High`].
pub const HIGH_THRESHOLD: u64 = 200;

/// Critical scores at or above this carry the disciplinary description.
pub const CRITICAL_THRESHOLD: u64 = 400;

/// Computes the Bradford Factor for a set of absence spells.
///
/// # Arguments
///
/// * `periods` - The absence spells to score, typically from
///   [`extract_absence_periods`](super::extract_absence_periods)
///
/// # Returns
///
/// A [`BradfordScore`] with the spell count, total days, score, and the
/// severity classification from [`classify_score`].
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calculate_bradford_factor;
/// use attendance_engine::models::{AbsencePeriod, AbsenceType, BradfordLevel};
/// use chrono::NaiveDate;
///
/// let day = |d: u32| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
/// let periods = vec![
///     AbsencePeriod { start_date: day(1), end_date: day(3), days: 3, absence_type: AbsenceType::Sick },
///     AbsencePeriod { start_date: day(10), end_date: day(14), days: 5, absence_type: AbsenceType::Sick },
/// ];
///
/// let score = calculate_bradford_factor(&periods);
/// assert_eq!(score.score, 32); // 2² × 8
/// assert_eq!(score.level, BradfordLevel::Low);
/// ```
pub fn calculate_bradford_factor(periods: &[AbsencePeriod]) -> BradfordScore {
    let spells = periods.len() as u32;
    let days: u32 = periods.iter().map(|p| p.days).sum();
    let score = u64::from(spells) * u64::from(spells) * u64::from(days);

    let (level, description) = classify_score(score);

    BradfordScore {
        score,
        spells,
        days,
        level,
        description: description.to_string(),
    }
}

/// Maps a Bradford score to its severity level and description.
///
/// | score       | level    | description |
/// |-------------|----------|-------------|
/// | < 50        | low      | Good attendance |
/// | 50 – 124    | medium   | Monitor attendance |
/// | 125 – 199   | high     | Attendance concern - verbal warning |
/// | 200 – 399   | critical | Serious attendance issue - written warning |
/// | ≥ 400       | critical | Critical attendance issue - disciplinary action |
pub fn classify_score(score: u64) -> (BradfordLevel, &'static str) {
    if score < LOW_THRESHOLD {
        (BradfordLevel::Low, "Good attendance")
    } else if score < MEDIUM_THRESHOLD {
        (BradfordLevel::Medium, "Monitor attendance")
    } else if score < HIGH_THRESHOLD {
        (BradfordLevel::High, "Attendance concern - verbal warning")
    } else if score < CRITICAL_THRESHOLD {
        (
            BradfordLevel::Critical,
            "Serious attendance issue - written warning",
        )
    } else {
        (
            BradfordLevel::Critical,
            "Critical attendance issue - disciplinary action",
        )
    }
}
