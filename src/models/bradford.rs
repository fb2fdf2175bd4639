//! Bradford Factor result models.
//!
//! This module contains the derived value objects produced by the absence
//! scoring core: [`AbsencePeriod`] (one spell) and [`BradfordScore`] (the
//! aggregate for one member over one window).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LeaveType;

/// The leave types that can form an absence spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceType {
    /// Sick leave.
    Sick,
    /// Unpaid leave.
    Unpaid,
}

impl AbsenceType {
    /// Maps a recorded leave type to an absence type, if it qualifies.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{AbsenceType, LeaveType};
    ///
    /// assert_eq!(AbsenceType::from_leave_type(LeaveType::Sick), Some(AbsenceType::Sick));
    /// assert_eq!(AbsenceType::from_leave_type(LeaveType::Holiday), None);
    /// ```
    pub fn from_leave_type(leave_type: LeaveType) -> Option<Self> {
        match leave_type {
            LeaveType::Sick => Some(AbsenceType::Sick),
            LeaveType::Unpaid => Some(AbsenceType::Unpaid),
            _ => None,
        }
    }
}

/// A maximal run of consecutive absence days of a single leave type.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AbsencePeriod, AbsenceType};
/// use chrono::NaiveDate;
///
/// let period = AbsencePeriod {
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     days: 2,
///     absence_type: AbsenceType::Sick,
/// };
/// assert_eq!(period.days, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsencePeriod {
    /// First day of the spell (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the spell (inclusive).
    pub end_date: NaiveDate,
    /// Number of days in the spell, always at least 1.
    pub days: u32,
    /// The leave type shared by every day of the spell.
    #[serde(rename = "type")]
    pub absence_type: AbsenceType,
}

impl AbsencePeriod {
    /// Starts a one-day spell.
    pub fn single_day(date: NaiveDate, absence_type: AbsenceType) -> Self {
        Self {
            start_date: date,
            end_date: date,
            days: 1,
            absence_type,
        }
    }
}

/// Severity tier of a Bradford score.
///
/// Note that two score bands map to [`BradfordLevel::Critical`]; the
/// distinction between them survives only in [`BradfordScore::description`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BradfordLevel {
    /// Score below 50.
    Low,
    /// Score from 50 up to 125.
    Medium,
    /// Score from 125 up to 200.
    High,
    /// Score of 200 or more.
    Critical,
}

impl std::fmt::Display for BradfordLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BradfordLevel::Low => write!(f, "low"),
            BradfordLevel::Medium => write!(f, "medium"),
            BradfordLevel::High => write!(f, "high"),
            BradfordLevel::Critical => write!(f, "critical"),
        }
    }
}

/// The Bradford Factor outcome for one member over one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BradfordScore {
    /// `spells² × days`.
    pub score: u64,
    /// Number of absence spells.
    pub spells: u32,
    /// Total absence days across all spells.
    pub days: u32,
    /// Severity tier derived from the score.
    pub level: BradfordLevel,
    /// Human-readable severity label.
    pub description: String,
}

impl BradfordScore {
    /// Renders the score breakdown, e.g. `"2² × 8 = 32"`.
    pub fn formula(&self) -> String {
        format!("{}² × {} = {}", self.spells, self.days, self.score)
    }

    /// Returns true for the high and critical tiers.
    pub fn is_high_risk(&self) -> bool {
        matches!(self.level, BradfordLevel::High | BradfordLevel::Critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_period_serializes_type_field() {
        let period = AbsencePeriod::single_day(
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            AbsenceType::Unpaid,
        );
        let json = serde_json::to_value(&period).unwrap();
        assert_eq!(json["type"], "unpaid");
        assert_eq!(json["start_date"], "2024-01-04");
        assert_eq!(json["end_date"], "2024-01-04");
        assert_eq!(json["days"], 1);
    }

    #[test]
    fn test_only_sick_and_unpaid_map_to_absence_types() {
        assert_eq!(
            AbsenceType::from_leave_type(LeaveType::Unpaid),
            Some(AbsenceType::Unpaid)
        );
        for leave in [
            LeaveType::None,
            LeaveType::Vacation,
            LeaveType::Holiday,
            LeaveType::Unknown,
        ] {
            assert_eq!(AbsenceType::from_leave_type(leave), None);
        }
    }

    #[test]
    fn test_level_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&BradfordLevel::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(BradfordLevel::Medium.to_string(), "medium");
    }

    #[test]
    fn test_levels_are_ordered_by_severity() {
        assert!(BradfordLevel::Low < BradfordLevel::Medium);
        assert!(BradfordLevel::High < BradfordLevel::Critical);
    }

    #[test]
    fn test_formula_renders_breakdown() {
        let score = BradfordScore {
            score: 32,
            spells: 2,
            days: 8,
            level: BradfordLevel::Low,
            description: "Good attendance".to_string(),
        };
        assert_eq!(score.formula(), "2² × 8 = 32");
        assert!(!score.is_high_risk());
    }
}
