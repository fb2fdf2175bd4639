//! In-memory data store for the Attendance Engine.
//!
//! The store owns clients, team members, users and attendance records, and
//! exposes explicit create/read/update/delete operations over them. It is
//! seeded from configuration at start-up; nothing is persisted.

mod data_store;
mod payloads;

pub use data_store::{ClockField, DataStore};
pub use payloads::{
    AttendanceUpdate, ClientUpdate, NewAttendance, NewClient, NewTeamMember, NewUser,
    TeamMemberUpdate, UserUpdate,
};
