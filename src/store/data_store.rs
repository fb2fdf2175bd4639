//! In-memory repository for clients, team members, users and attendance.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SeedData;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Client, LeaveType, TeamMember, User};

use super::payloads::{
    AttendanceUpdate, ClientUpdate, NewAttendance, NewClient, NewTeamMember, NewUser,
    TeamMemberUpdate, UserUpdate,
};

/// Which clock time an attendance entry sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockField {
    /// The clock-in time.
    In,
    /// The clock-out time.
    Out,
}

/// Owns every collection the dashboard works on.
///
/// The store enforces that a member has at most one attendance record per
/// day. Consumers that need scores take a snapshot through
/// [`DataStore::attendance`] and pass it to [`crate::calculation`].
///
/// # Example
///
/// ```
/// use attendance_engine::store::{DataStore, NewClient};
///
/// let mut store = DataStore::new();
/// let client = store.add_client(NewClient {
///     name: "CK Dermatology".to_string(),
///     code: "CKD".to_string(),
/// });
/// assert!(client.id.starts_with("client-"));
/// assert_eq!(store.clients().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    clients: Vec<Client>,
    team_members: Vec<TeamMember>,
    users: Vec<User>,
    attendance: Vec<AttendanceRecord>,
}

impl DataStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from seed data.
    ///
    /// Returns `DuplicateAttendance` if the seed holds two records for the
    /// same member and day.
    pub fn from_seed(seed: SeedData) -> EngineResult<Self> {
        let mut store = Self {
            clients: seed.clients,
            team_members: seed.team_members,
            users: seed.users,
            attendance: Vec::with_capacity(seed.attendance.len()),
        };

        for record in seed.attendance {
            store.ensure_no_record_for(&record.member_id, record.date)?;
            store.attendance.push(record);
        }

        info!(
            clients = store.clients.len(),
            team_members = store.team_members.len(),
            users = store.users.len(),
            attendance = store.attendance.len(),
            "Data store seeded"
        );

        Ok(store)
    }

    // ------------------------------------------------------------------
    // Clients
    // ------------------------------------------------------------------

    /// Returns all clients.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Looks up a client by id.
    pub fn client(&self, id: &str) -> EngineResult<&Client> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Client", id))
    }

    /// Creates an active client.
    pub fn add_client(&mut self, client: NewClient) -> Client {
        let client = Client {
            id: new_id("client"),
            name: client.name,
            code: client.code,
            active: true,
        };
        debug!(client_id = %client.id, "Client added");
        self.clients.push(client.clone());
        client
    }

    /// Applies an update to a client.
    pub fn update_client(&mut self, id: &str, update: ClientUpdate) -> EngineResult<Client> {
        let client = self
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Client", id))?;
        update.apply(client);
        Ok(client.clone())
    }

    /// Removes a client.
    pub fn delete_client(&mut self, id: &str) -> EngineResult<Client> {
        let index = self
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| not_found("Client", id))?;
        debug!(client_id = id, "Client deleted");
        Ok(self.clients.remove(index))
    }

    // ------------------------------------------------------------------
    // Team members
    // ------------------------------------------------------------------

    /// Returns all team members, active or not.
    pub fn team_members(&self) -> &[TeamMember] {
        &self.team_members
    }

    /// Looks up a team member by id.
    pub fn team_member(&self, id: &str) -> EngineResult<&TeamMember> {
        self.team_members
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("Team member", id))
    }

    /// Creates an active team member on an existing client.
    pub fn add_team_member(&mut self, member: NewTeamMember) -> EngineResult<TeamMember> {
        self.client(&member.client_id)?;

        let member = TeamMember {
            id: new_id("tm"),
            name: member.name,
            position: member.position,
            client_id: member.client_id,
            shift: member.shift,
            team_lead_id: member.team_lead_id,
            active: true,
        };
        debug!(member_id = %member.id, client_id = %member.client_id, "Team member added");
        self.team_members.push(member.clone());
        Ok(member)
    }

    /// Applies an update to a team member.
    pub fn update_team_member(
        &mut self,
        id: &str,
        update: TeamMemberUpdate,
    ) -> EngineResult<TeamMember> {
        if let Some(client_id) = &update.client_id {
            self.client(client_id)?;
        }
        let member = self
            .team_members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("Team member", id))?;
        update.apply(member);
        Ok(member.clone())
    }

    /// Removes a team member. Their attendance history is kept.
    pub fn delete_team_member(&mut self, id: &str) -> EngineResult<TeamMember> {
        let index = self
            .team_members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| not_found("Team member", id))?;
        debug!(member_id = id, "Team member deleted");
        Ok(self.team_members.remove(index))
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Returns all users.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Looks up a user by id.
    pub fn user(&self, id: &str) -> EngineResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("User", id))
    }

    /// Creates a user, stamping the creation time.
    pub fn add_user(&mut self, user: NewUser) -> User {
        let user = User {
            id: new_id("user"),
            username: user.username,
            name: user.name,
            position: user.position,
            assigned_clients: user.assigned_clients,
            created_at: Utc::now(),
        };
        debug!(user_id = %user.id, position = %user.position, "User added");
        self.users.push(user.clone());
        user
    }

    /// Applies an update to a user.
    pub fn update_user(&mut self, id: &str, update: UserUpdate) -> EngineResult<User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("User", id))?;
        update.apply(user);
        Ok(user.clone())
    }

    /// Removes a user.
    pub fn delete_user(&mut self, id: &str) -> EngineResult<User> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| not_found("User", id))?;
        debug!(user_id = id, "User deleted");
        Ok(self.users.remove(index))
    }

    // ------------------------------------------------------------------
    // Attendance
    // ------------------------------------------------------------------

    /// Returns every attendance record, for all members.
    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    /// Returns one member's records in date order.
    pub fn attendance_for_member(&self, member_id: &str) -> Vec<&AttendanceRecord> {
        let mut records: Vec<&AttendanceRecord> = self
            .attendance
            .iter()
            .filter(|r| r.member_id == member_id)
            .collect();
        records.sort_by_key(|r| r.date);
        records
    }

    /// Looks up an attendance record by id.
    pub fn attendance_record(&self, id: &str) -> EngineResult<&AttendanceRecord> {
        self.attendance
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found("Attendance record", id))
    }

    /// Finds a member's record for a day.
    pub fn attendance_on(&self, member_id: &str, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance
            .iter()
            .find(|r| r.member_id == member_id && r.date == date)
    }

    /// Creates an attendance record.
    ///
    /// Fails with `NotFound` for an unknown member and with
    /// `DuplicateAttendance` if the member already has a record that day.
    pub fn add_attendance(&mut self, entry: NewAttendance) -> EngineResult<AttendanceRecord> {
        self.team_member(&entry.member_id)?;
        self.ensure_no_record_for(&entry.member_id, entry.date)?;

        let record = entry.into_record(new_id("att"));
        debug!(
            record_id = %record.id,
            member_id = %record.member_id,
            date = %record.date,
            "Attendance added"
        );
        self.attendance.push(record.clone());
        Ok(record)
    }

    /// Applies an update to an attendance record.
    pub fn update_attendance(
        &mut self,
        id: &str,
        update: AttendanceUpdate,
    ) -> EngineResult<AttendanceRecord> {
        let record = self.attendance_mut(id)?;
        update.apply(record);
        Ok(record.clone())
    }

    /// Removes an attendance record.
    pub fn delete_attendance(&mut self, id: &str) -> EngineResult<AttendanceRecord> {
        let index = self
            .attendance
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| not_found("Attendance record", id))?;
        Ok(self.attendance.remove(index))
    }

    /// Applies `update` to the member's record for `date`, creating the
    /// record first if the day has none yet.
    ///
    /// New records start with leave type `none` unless the update sets one.
    pub fn upsert_attendance(
        &mut self,
        member_id: &str,
        date: NaiveDate,
        update: AttendanceUpdate,
    ) -> EngineResult<AttendanceRecord> {
        if let Some(id) = self.attendance_on(member_id, date).map(|r| r.id.clone()) {
            return self.update_attendance(&id, update);
        }

        self.add_attendance(NewAttendance {
            member_id: member_id.to_string(),
            date,
            clock_in: update.clock_in.flatten(),
            clock_out: update.clock_out.flatten(),
            break_minutes: update.break_minutes.unwrap_or(0),
            leave_type: update.leave_type.unwrap_or(Some(LeaveType::None)),
            notes: update.notes.flatten(),
        })
    }

    /// Sets a clock time on the member's record for `date`, creating the
    /// record if the day has none yet.
    pub fn record_clock_time(
        &mut self,
        member_id: &str,
        date: NaiveDate,
        field: ClockField,
        time: Option<NaiveTime>,
    ) -> EngineResult<AttendanceRecord> {
        let update = match field {
            ClockField::In => AttendanceUpdate {
                clock_in: Some(time),
                ..Default::default()
            },
            ClockField::Out => AttendanceUpdate {
                clock_out: Some(time),
                ..Default::default()
            },
        };
        self.upsert_attendance(member_id, date, update)
    }

    /// Sets the leave type on the member's record for `date`, creating the
    /// record if the day has none yet.
    pub fn record_leave(
        &mut self,
        member_id: &str,
        date: NaiveDate,
        leave_type: LeaveType,
    ) -> EngineResult<AttendanceRecord> {
        self.upsert_attendance(
            member_id,
            date,
            AttendanceUpdate {
                leave_type: Some(Some(leave_type)),
                ..Default::default()
            },
        )
    }

    /// Marks a record as validated by a user.
    pub fn validate_attendance(
        &mut self,
        record_id: &str,
        validator_id: &str,
        at: DateTime<Utc>,
    ) -> EngineResult<AttendanceRecord> {
        self.user(validator_id)?;

        let record = self.attendance_mut(record_id)?;
        record.validated_by = Some(validator_id.to_string());
        record.validated_at = Some(at);
        info!(
            record_id,
            validator_id,
            member_id = %record.member_id,
            "Attendance validated"
        );
        Ok(record.clone())
    }

    fn attendance_mut(&mut self, id: &str) -> EngineResult<&mut AttendanceRecord> {
        self.attendance
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found("Attendance record", id))
    }

    fn ensure_no_record_for(&self, member_id: &str, date: NaiveDate) -> EngineResult<()> {
        match self.attendance_on(member_id, date) {
            Some(_) => Err(EngineError::DuplicateAttendance {
                member_id: member_id.to_string(),
                date,
            }),
            None => Ok(()),
        }
    }
}

fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

fn not_found(entity: &'static str, id: &str) -> EngineError {
    EngineError::NotFound {
        entity,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn seeded_store() -> (DataStore, String, String) {
        let mut store = DataStore::new();
        let client = store.add_client(NewClient {
            name: "Behavior Frontiers".to_string(),
            code: "BF".to_string(),
        });
        let member = store
            .add_team_member(NewTeamMember {
                name: "Emily Davis".to_string(),
                position: Position::MedicalBiller,
                client_id: client.id.clone(),
                shift: "15:00-23:00".to_string(),
                team_lead_id: None,
            })
            .unwrap();
        let user = store.add_user(NewUser {
            username: "john.lead".to_string(),
            name: "John Smith".to_string(),
            position: Position::TeamLead,
            assigned_clients: vec![client.id],
        });
        (store, member.id, user.id)
    }

    #[test]
    fn test_generated_ids_use_prefixes() {
        let (store, member_id, user_id) = seeded_store();
        assert!(store.clients()[0].id.starts_with("client-"));
        assert!(member_id.starts_with("tm-"));
        assert!(user_id.starts_with("user-"));
    }

    #[test]
    fn test_client_crud() {
        let mut store = DataStore::new();
        let client = store.add_client(NewClient {
            name: "MedLab Solutions".to_string(),
            code: "MLS".to_string(),
        });
        assert!(client.active);

        let updated = store
            .update_client(
                &client.id,
                ClientUpdate {
                    name: Some("MedLab".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "MedLab");
        assert_eq!(store.client(&client.id).unwrap().name, "MedLab");

        store.delete_client(&client.id).unwrap();
        assert!(matches!(
            store.client(&client.id),
            Err(EngineError::NotFound { entity: "Client", .. })
        ));
    }

    #[test]
    fn test_team_member_requires_existing_client() {
        let mut store = DataStore::new();
        let result = store.add_team_member(NewTeamMember {
            name: "Ghost".to_string(),
            position: Position::MedicalCoder,
            client_id: "client-missing".to_string(),
            shift: "09:00-17:00".to_string(),
            team_lead_id: None,
        });
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_update_and_delete_team_member() {
        let (mut store, member_id, _) = seeded_store();
        let updated = store
            .update_team_member(
                &member_id,
                TeamMemberUpdate {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated.active);

        store.delete_team_member(&member_id).unwrap();
        assert!(store.team_members().is_empty());
        assert!(store.delete_team_member(&member_id).is_err());
    }

    #[test]
    fn test_user_crud_stamps_created_at() {
        let (mut store, _, user_id) = seeded_store();
        let before = Utc::now();
        let user = store.add_user(NewUser {
            username: "qa".to_string(),
            name: "Quinn".to_string(),
            position: Position::QaSpecialist,
            assigned_clients: vec![],
        });
        assert!(user.created_at >= before);

        store
            .update_user(
                &user_id,
                UserUpdate {
                    position: Some(Position::SeniorTeamLead),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(
            store.user(&user_id).unwrap().position,
            Position::SeniorTeamLead
        );

        store.delete_user(&user.id).unwrap();
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn test_second_record_same_day_is_rejected() {
        let (mut store, member_id, _) = seeded_store();
        let date = make_date("2024-01-02");
        store
            .add_attendance(NewAttendance::new(member_id.clone(), date))
            .unwrap();

        let result = store.add_attendance(NewAttendance::new(member_id, date));
        assert!(matches!(
            result,
            Err(EngineError::DuplicateAttendance { .. })
        ));
        assert_eq!(store.attendance().len(), 1);
    }

    #[test]
    fn test_attendance_for_unknown_member_is_rejected() {
        let (mut store, _, _) = seeded_store();
        let result = store.add_attendance(NewAttendance::new("tm-missing", make_date("2024-01-02")));
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_record_clock_time_upserts() {
        let (mut store, member_id, _) = seeded_store();
        let date = make_date("2024-01-02");

        let created = store
            .record_clock_time(&member_id, date, ClockField::In, time(15, 0))
            .unwrap();
        assert_eq!(created.leave_type, Some(LeaveType::None));
        assert_eq!(created.clock_in, time(15, 0));

        let updated = store
            .record_clock_time(&member_id, date, ClockField::Out, time(23, 0))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.clock_in, time(15, 0));
        assert_eq!(updated.clock_out, time(23, 0));
        assert_eq!(store.attendance().len(), 1);
    }

    #[test]
    fn test_record_leave_upserts() {
        let (mut store, member_id, _) = seeded_store();
        let date = make_date("2024-01-03");

        let created = store.record_leave(&member_id, date, LeaveType::Sick).unwrap();
        assert!(created.is_absence_day());

        let updated = store
            .record_leave(&member_id, date, LeaveType::Vacation)
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.leave_type, Some(LeaveType::Vacation));
        assert_eq!(store.attendance().len(), 1);
    }

    #[test]
    fn test_validate_attendance_records_validator() {
        let (mut store, member_id, user_id) = seeded_store();
        let record = store
            .record_leave(&member_id, make_date("2024-01-03"), LeaveType::Sick)
            .unwrap();
        let at = Utc::now();

        let validated = store.validate_attendance(&record.id, &user_id, at).unwrap();
        assert_eq!(validated.validated_by.as_deref(), Some(user_id.as_str()));
        assert_eq!(validated.validated_at, Some(at));
        assert!(validated.is_validated());
    }

    #[test]
    fn test_validate_requires_known_user_and_record() {
        let (mut store, member_id, user_id) = seeded_store();
        let record = store
            .record_leave(&member_id, make_date("2024-01-03"), LeaveType::Sick)
            .unwrap();

        assert!(store
            .validate_attendance(&record.id, "user-missing", Utc::now())
            .is_err());
        assert!(store
            .validate_attendance("att-missing", &user_id, Utc::now())
            .is_err());
    }

    #[test]
    fn test_attendance_for_member_is_date_ordered() {
        let (mut store, member_id, _) = seeded_store();
        for date in ["2024-01-05", "2024-01-01", "2024-01-03"] {
            store
                .record_leave(&member_id, make_date(date), LeaveType::Sick)
                .unwrap();
        }
        let dates: Vec<NaiveDate> = store
            .attendance_for_member(&member_id)
            .iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(
            dates,
            vec![
                make_date("2024-01-01"),
                make_date("2024-01-03"),
                make_date("2024-01-05"),
            ]
        );
    }

    #[test]
    fn test_from_seed_rejects_duplicate_days() {
        let date = make_date("2024-01-02");
        let seed = SeedData {
            attendance: vec![
                AttendanceRecord::new("att-1", "tm-1", date),
                AttendanceRecord::new("att-2", "tm-1", date),
            ],
            ..Default::default()
        };
        assert!(matches!(
            DataStore::from_seed(seed),
            Err(EngineError::DuplicateAttendance { .. })
        ));
    }

    #[test]
    fn test_upsert_attendance_sets_only_provided_fields() {
        let (mut store, member_id, _) = seeded_store();
        let date = make_date("2024-01-04");

        let created = store
            .upsert_attendance(
                &member_id,
                date,
                AttendanceUpdate {
                    clock_in: Some(time(9, 0)),
                    break_minutes: Some(30),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(created.break_minutes, 30);
        assert_eq!(created.leave_type, Some(LeaveType::None));

        let updated = store
            .upsert_attendance(
                &member_id,
                date,
                AttendanceUpdate {
                    notes: Some(Some("Left early".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.clock_in, time(9, 0));
        assert_eq!(updated.break_minutes, 30);
        assert_eq!(updated.notes.as_deref(), Some("Left early"));

        assert_eq!(store.attendance_record(&created.id).unwrap().date, date);
        assert!(matches!(
            store.attendance_record("att-missing"),
            Err(EngineError::NotFound { .. })
        ));
    }
}
