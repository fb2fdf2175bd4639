//! Organisation models: clients, team members, users and positions.
//!
//! Team members are the employees whose attendance is tracked; users are the
//! people operating the dashboard. Both carry a [`Position`], whose rank
//! drives the access rules in [`crate::access`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job position within the organisation.
///
/// Serialized using the human-readable titles (e.g. `"Team Lead"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Full administrative access.
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    /// Leads several team leads.
    #[serde(rename = "Senior Team Lead")]
    SeniorTeamLead,
    /// Leads a team on a client.
    #[serde(rename = "Team Lead")]
    TeamLead,
    /// Deputises for a team lead.
    #[serde(rename = "Assistant Team Lead")]
    AssistantTeamLead,
    /// Billing staff.
    #[serde(rename = "Medical Biller")]
    MedicalBiller,
    /// Coding staff.
    #[serde(rename = "Medical Coder")]
    MedicalCoder,
    /// Quality assurance staff.
    #[serde(rename = "QA Specialist")]
    QaSpecialist,
    /// Operations management.
    #[serde(rename = "Operations Manager")]
    OperationsManager,
}

impl Position {
    /// Returns the position's rank in the hierarchy (higher outranks lower).
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Position;
    ///
    /// assert_eq!(Position::SuperAdmin.rank(), 100);
    /// assert!(Position::OperationsManager.rank() > Position::TeamLead.rank());
    /// assert_eq!(Position::MedicalBiller.rank(), Position::MedicalCoder.rank());
    /// ```
    pub fn rank(self) -> u8 {
        match self {
            Position::SuperAdmin => 100,
            Position::SeniorTeamLead => 80,
            Position::OperationsManager => 70,
            Position::TeamLead => 60,
            Position::AssistantTeamLead => 40,
            Position::QaSpecialist => 30,
            Position::MedicalBiller | Position::MedicalCoder => 20,
        }
    }

    /// Returns the human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Position::SuperAdmin => "Super Admin",
            Position::SeniorTeamLead => "Senior Team Lead",
            Position::TeamLead => "Team Lead",
            Position::AssistantTeamLead => "Assistant Team Lead",
            Position::MedicalBiller => "Medical Biller",
            Position::MedicalCoder => "Medical Coder",
            Position::QaSpecialist => "QA Specialist",
            Position::OperationsManager => "Operations Manager",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A client account that team members are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier for the client.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short code (e.g. "BF").
    pub code: String,
    /// Whether the client is currently serviced.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// An employee whose attendance is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique identifier for the member.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Job position.
    pub position: Position,
    /// The client the member works on.
    pub client_id: String,
    /// Scheduled shift, e.g. `"09:00-17:00"`.
    pub shift: String,
    /// The member's team lead, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_lead_id: Option<String>,
    /// Inactive members are hidden from rosters and overviews.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// A dashboard operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Job position, which determines what the user may manage.
    pub position: Position,
    /// Client ids the user is responsible for.
    #[serde(default)]
    pub assigned_clients: Vec<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns true for the Super Admin position.
    pub fn is_super_admin(&self) -> bool {
        self.position == Position::SuperAdmin
    }
}

fn default_active() -> bool {
    true
}
