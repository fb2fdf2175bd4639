//! Configuration types for the Attendance Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::calculation::DEFAULT_ROLLING_MONTHS;
use crate::models::{AttendanceRecord, Client, TeamMember, User};

/// Identifying information about the organisation.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganisationConfig {
    /// The organisation's display name.
    pub name: String,
}

/// Bradford Factor settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BradfordSettings {
    /// Length of the trailing window spells are counted over, in months.
    #[serde(default = "default_rolling_months")]
    pub rolling_months: u32,
}

impl Default for BradfordSettings {
    fn default() -> Self {
        Self {
            rolling_months: DEFAULT_ROLLING_MONTHS,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Address the server listens on, e.g. `"127.0.0.1:3000"`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Top-level engine configuration (`engine.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// The organisation the engine serves.
    pub organisation: OrganisationConfig,
    /// Bradford Factor settings.
    #[serde(default)]
    pub bradford: BradfordSettings,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
}

/// Initial data loaded into the store at start-up (`seed.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Initial clients.
    #[serde(default)]
    pub clients: Vec<Client>,
    /// Initial team members.
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    /// Initial users.
    #[serde(default)]
    pub users: Vec<User>,
    /// Initial attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

fn default_rolling_months() -> u32 {
    DEFAULT_ROLLING_MONTHS
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}
