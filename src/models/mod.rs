//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod bradford;
mod organisation;

pub(crate) use attendance::clock_time;
pub use attendance::{parse_clock_time, parse_iso_date, AttendanceRecord, LeaveType};
pub use bradford::{AbsencePeriod, AbsenceType, BradfordLevel, BradfordScore};
pub use organisation::{Client, Position, TeamMember, User};
