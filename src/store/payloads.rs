//! Create and update payloads for the data store.
//!
//! `New*` structs carry everything needed to create an entity except the
//! id, which the store generates. Each `*Update` struct carries only the
//! fields to change; `None` leaves a field untouched. For optional fields on
//! the entity, the nested `Option` distinguishes "leave alone" (`None`) from
//! "clear" (`Some(None)`).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, Client, LeaveType, Position, TeamMember, User};

/// A client to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: String,
}

/// A team member to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeamMember {
    /// Full name.
    pub name: String,
    /// Job position.
    pub position: Position,
    /// The client the member works on.
    pub client_id: String,
    /// Scheduled shift, e.g. `"09:00-17:00"`.
    pub shift: String,
    /// The member's team lead, if any.
    #[serde(default)]
    pub team_lead_id: Option<String>,
}

/// A user to be created. The store stamps `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Job position.
    pub position: Position,
    /// Client ids the user is responsible for.
    #[serde(default)]
    pub assigned_clients: Vec<String>,
}

/// An attendance record to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    /// The member the record belongs to.
    pub member_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// Clock-in time.
    pub clock_in: Option<NaiveTime>,
    /// Clock-out time.
    pub clock_out: Option<NaiveTime>,
    /// Unpaid break minutes.
    pub break_minutes: u32,
    /// Leave recorded for the day.
    pub leave_type: Option<LeaveType>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl NewAttendance {
    /// Starts an empty entry for a member on a date.
    pub fn new(member_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            member_id: member_id.into(),
            date,
            clock_in: None,
            clock_out: None,
            break_minutes: 0,
            leave_type: None,
            notes: None,
        }
    }

    pub(crate) fn into_record(self, id: String) -> AttendanceRecord {
        AttendanceRecord {
            clock_in: self.clock_in,
            clock_out: self.clock_out,
            break_minutes: self.break_minutes,
            leave_type: self.leave_type,
            notes: self.notes,
            ..AttendanceRecord::new(id, self.member_id, self.date)
        }
    }
}

/// Fields of a client that can be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New short code.
    pub code: Option<String>,
    /// New active flag.
    pub active: Option<bool>,
}

impl ClientUpdate {
    pub(crate) fn apply(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(code) = self.code {
            client.code = code;
        }
        if let Some(active) = self.active {
            client.active = active;
        }
    }
}

/// Fields of a team member that can be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberUpdate {
    /// New name.
    pub name: Option<String>,
    /// New position.
    pub position: Option<Position>,
    /// New client assignment.
    pub client_id: Option<String>,
    /// New shift pattern.
    pub shift: Option<String>,
    /// New team lead; `Some(None)` removes the lead.
    pub team_lead_id: Option<Option<String>>,
    /// New active flag.
    pub active: Option<bool>,
}

impl TeamMemberUpdate {
    pub(crate) fn apply(self, member: &mut TeamMember) {
        if let Some(name) = self.name {
            member.name = name;
        }
        if let Some(position) = self.position {
            member.position = position;
        }
        if let Some(client_id) = self.client_id {
            member.client_id = client_id;
        }
        if let Some(shift) = self.shift {
            member.shift = shift;
        }
        if let Some(team_lead_id) = self.team_lead_id {
            member.team_lead_id = team_lead_id;
        }
        if let Some(active) = self.active {
            member.active = active;
        }
    }
}

/// Fields of a user that can be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New login name.
    pub username: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New position.
    pub position: Option<Position>,
    /// Replacement list of assigned client ids.
    pub assigned_clients: Option<Vec<String>>,
}

impl UserUpdate {
    pub(crate) fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(position) = self.position {
            user.position = position;
        }
        if let Some(assigned_clients) = self.assigned_clients {
            user.assigned_clients = assigned_clients;
        }
    }
}

/// Fields of an attendance record that can be changed.
///
/// The member and date of a record are fixed once created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceUpdate {
    /// New clock-in; `Some(None)` clears it.
    pub clock_in: Option<Option<NaiveTime>>,
    /// New clock-out; `Some(None)` clears it.
    pub clock_out: Option<Option<NaiveTime>>,
    /// New break minutes.
    pub break_minutes: Option<u32>,
    /// New leave type; `Some(None)` clears it.
    pub leave_type: Option<Option<LeaveType>>,
    /// New notes; `Some(None)` clears them.
    pub notes: Option<Option<String>>,
}

impl AttendanceUpdate {
    pub(crate) fn apply(self, record: &mut AttendanceRecord) {
        if let Some(clock_in) = self.clock_in {
            record.clock_in = clock_in;
        }
        if let Some(clock_out) = self.clock_out {
            record.clock_out = clock_out;
        }
        if let Some(break_minutes) = self.break_minutes {
            record.break_minutes = break_minutes;
        }
        if let Some(leave_type) = self.leave_type {
            record.leave_type = leave_type;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
    }
}
