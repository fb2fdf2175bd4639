//! Attendance calculations.
//!
//! This module contains the Bradford Factor core (spell extraction and
//! scoring), the per-member rolling-window assessment built on it, and the
//! worked-hours and team overview aggregates.
//!
//! Everything here is a pure function over a snapshot of records; nothing
//! reads shared state.

mod absence_periods;
mod bradford_factor;
mod member_score;
mod team_overview;
mod worked_hours;

pub use absence_periods::extract_absence_periods;
pub use bradford_factor::{
    calculate_bradford_factor, classify_score, CRITICAL_THRESHOLD, HIGH_THRESHOLD, LOW_THRESHOLD,
    MEDIUM_THRESHOLD,
};
pub use member_score::{
    assess_member, get_member_bradford_score, member_bradford_score_as_of, rolling_window,
    MemberAssessment, RollingWindow, DEFAULT_ROLLING_MONTHS,
};
pub use team_overview::{
    build_team_overview, summarize_bradford, week_start, BradfordSummary, ClientAttendance,
    FlaggedMember, TeamOverview,
};
pub use worked_hours::{calculate_worked_hours, total_worked_hours};
