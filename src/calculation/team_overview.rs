//! Team attendance overview.
//!
//! This module aggregates a roster of team members and the attendance
//! snapshot into the daily figures shown on the dashboard overview: who is
//! present or on leave today, hours worked, and which members have a
//! concerning Bradford score.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, BradfordLevel, BradfordScore, TeamMember};

use super::{member_bradford_score_as_of, total_worked_hours};

/// A member whose Bradford score is above the low tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedMember {
    /// The member's id.
    pub member_id: String,
    /// The member's name.
    pub name: String,
    /// The member's score.
    pub score: BradfordScore,
}

/// Bradford figures across a roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BradfordSummary {
    /// Members at the high or critical level.
    pub high_risk: usize,
    /// Members at the medium level.
    pub concerns: usize,
    /// Every member above the low level, highest score first.
    pub flagged: Vec<FlaggedMember>,
}

/// Attendance for the members assigned to one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAttendance {
    /// The client's id.
    pub client_id: String,
    /// Members on the roster for this client.
    pub members: usize,
    /// Of those, members present on the day.
    pub present: usize,
}

/// The overview for a roster on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOverview {
    /// The day the overview describes.
    pub date: NaiveDate,
    /// Members on the roster.
    pub total_members: usize,
    /// Members clocked in and not on leave.
    pub present: usize,
    /// Members with leave recorded.
    pub on_leave: usize,
    /// Members with no record for the day.
    pub absent: usize,
    /// Records for the day that have been validated.
    pub validated: usize,
    /// Hours worked on the day.
    pub hours_today: Decimal,
    /// Hours worked from Monday of the day's week up to the day.
    pub hours_this_week: Decimal,
    /// Per-client presence, ordered by client id.
    pub clients: Vec<ClientAttendance>,
    /// Bradford figures for the roster.
    pub bradford: BradfordSummary,
}

/// Returns the Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Builds the overview for `members` on `date`.
///
/// # Arguments
///
/// * `members` - The roster to report on (already narrowed to what the
///   viewer may see)
/// * `attendance` - Attendance records for any members; records of members
///   outside the roster are ignored
/// * `date` - The day to report on
/// * `rolling_months` - Window length for the Bradford scores, ending on `date`
pub fn build_team_overview(
    members: &[TeamMember],
    attendance: &[AttendanceRecord],
    date: NaiveDate,
    rolling_months: u32,
) -> TeamOverview {
    let roster: HashSet<&str> = members.iter().map(|m| m.id.as_str()).collect();
    let roster_records: Vec<&AttendanceRecord> = attendance
        .iter()
        .filter(|r| roster.contains(r.member_id.as_str()))
        .collect();

    let today: Vec<&AttendanceRecord> = roster_records
        .iter()
        .copied()
        .filter(|r| r.date == date)
        .collect();

    let monday = week_start(date);
    let hours_this_week = total_worked_hours(
        roster_records
            .iter()
            .copied()
            .filter(|r| r.date >= monday && r.date <= date),
    );

    let present_ids: HashSet<&str> = today
        .iter()
        .filter(|r| r.is_present())
        .map(|r| r.member_id.as_str())
        .collect();

    let mut clients: BTreeMap<&str, ClientAttendance> = BTreeMap::new();
    for member in members {
        let entry = clients
            .entry(member.client_id.as_str())
            .or_insert_with(|| ClientAttendance {
                client_id: member.client_id.clone(),
                members: 0,
                present: 0,
            });
        entry.members += 1;
        if present_ids.contains(member.id.as_str()) {
            entry.present += 1;
        }
    }

    TeamOverview {
        date,
        total_members: members.len(),
        present: present_ids.len(),
        on_leave: today.iter().filter(|r| r.is_on_leave()).count(),
        absent: members.len().saturating_sub(today.len()),
        validated: today.iter().filter(|r| r.is_validated()).count(),
        hours_today: total_worked_hours(today.iter().copied()),
        hours_this_week,
        clients: clients.into_values().collect(),
        bradford: summarize_bradford(members, attendance, rolling_months, date),
    }
}

/// Scores every member of the roster and collects the concerning ones.
pub fn summarize_bradford(
    members: &[TeamMember],
    attendance: &[AttendanceRecord],
    rolling_months: u32,
    as_of: NaiveDate,
) -> BradfordSummary {
    let mut summary = BradfordSummary::default();

    for member in members {
        let score = member_bradford_score_as_of(&member.id, attendance, rolling_months, as_of);
        match score.level {
            BradfordLevel::Low => continue,
            BradfordLevel::Medium => summary.concerns += 1,
            BradfordLevel::High | BradfordLevel::Critical => summary.high_risk += 1,
        }
        summary.flagged.push(FlaggedMember {
            member_id: member.id.clone(),
            name: member.name.clone(),
            score,
        });
    }

    summary.flagged.sort_by(|a, b| {
        b.score
            .score
            .cmp(&a.score.score)
            .then_with(|| a.name.cmp(&b.name))
    });

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveType, Position};
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn member(id: &str, name: &str, client_id: &str) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: name.to_string(),
            position: Position::MedicalBiller,
            client_id: client_id.to_string(),
            shift: "09:00-17:00".to_string(),
            team_lead_id: None,
            active: true,
        }
    }

    fn worked(member_id: &str, date: &str, hours: u32) -> AttendanceRecord {
        let mut r = AttendanceRecord::new(format!("att-{}-{}", member_id, date), member_id, make_date(date));
        r.clock_in = NaiveTime::from_hms_opt(9, 0, 0);
        r.clock_out = NaiveTime::from_hms_opt(9 + hours, 0, 0);
        r.leave_type = Some(LeaveType::None);
        r
    }

    fn on_leave(member_id: &str, date: &str, leave_type: LeaveType) -> AttendanceRecord {
        let mut r = AttendanceRecord::new(format!("att-{}-{}", member_id, date), member_id, make_date(date));
        r.leave_type = Some(leave_type);
        r
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-01-10 is a Wednesday
        assert_eq!(week_start(make_date("2024-01-10")), make_date("2024-01-08"));
        assert_eq!(week_start(make_date("2024-01-08")), make_date("2024-01-08"));
        // Sunday belongs to the week that started six days earlier
        assert_eq!(week_start(make_date("2024-01-14")), make_date("2024-01-08"));
    }

    #[test]
    fn test_daily_counts() {
        let members = vec![
            member("tm-1", "Ann", "client-1"),
            member("tm-2", "Ben", "client-1"),
            member("tm-3", "Cal", "client-2"),
            member("tm-4", "Dee", "client-2"),
        ];
        let mut validated = worked("tm-1", "2024-01-10", 8);
        validated.validated_by = Some("1".to_string());
        let attendance = vec![
            validated,
            worked("tm-2", "2024-01-10", 4),
            on_leave("tm-3", "2024-01-10", LeaveType::Vacation),
        ];

        let overview = build_team_overview(&members, &attendance, make_date("2024-01-10"), 12);

        assert_eq!(overview.total_members, 4);
        assert_eq!(overview.present, 2);
        assert_eq!(overview.on_leave, 1);
        assert_eq!(overview.absent, 1);
        assert_eq!(overview.validated, 1);
        assert_eq!(overview.hours_today, dec("12"));
        assert_eq!(
            overview.clients,
            vec![
                ClientAttendance {
                    client_id: "client-1".to_string(),
                    members: 2,
                    present: 2,
                },
                ClientAttendance {
                    client_id: "client-2".to_string(),
                    members: 2,
                    present: 0,
                },
            ]
        );
    }

    #[test]
    fn test_week_hours_run_from_monday_to_date() {
        let members = vec![member("tm-1", "Ann", "client-1")];
        let attendance = vec![
            worked("tm-1", "2024-01-05", 8), // previous Friday
            worked("tm-1", "2024-01-08", 8),
            worked("tm-1", "2024-01-09", 6),
            worked("tm-1", "2024-01-10", 7),
            worked("tm-1", "2024-01-11", 8), // after the reported day
        ];

        let overview = build_team_overview(&members, &attendance, make_date("2024-01-10"), 12);
        assert_eq!(overview.hours_today, dec("7"));
        assert_eq!(overview.hours_this_week, dec("21"));
    }

    #[test]
    fn test_records_outside_roster_are_ignored() {
        let members = vec![member("tm-1", "Ann", "client-1")];
        let attendance = vec![worked("tm-9", "2024-01-10", 8)];

        let overview = build_team_overview(&members, &attendance, make_date("2024-01-10"), 12);
        assert_eq!(overview.present, 0);
        assert_eq!(overview.absent, 1);
        assert_eq!(overview.hours_today, Decimal::ZERO);
    }

    #[test]
    fn test_bradford_summary_counts_and_orders_flagged_members() {
        let members = vec![
            member("tm-1", "Ann", "client-1"),
            member("tm-2", "Ben", "client-1"),
            member("tm-3", "Cal", "client-1"),
        ];
        let mut attendance = Vec::new();
        // Ann: 5 one-day spells, 5² × 5 = 125 (high)
        for day in ["2024-01-02", "2024-01-09", "2024-01-16", "2024-01-23", "2024-01-30"] {
            attendance.push(on_leave("tm-1", day, LeaveType::Sick));
        }
        // Ben: 4 one-day spells, 4² × 4 = 64 (medium)
        for day in ["2024-02-05", "2024-02-12", "2024-02-19", "2024-02-26"] {
            attendance.push(on_leave("tm-2", day, LeaveType::Unpaid));
        }
        // Cal: one spell, low
        attendance.push(on_leave("tm-3", "2024-02-01", LeaveType::Sick));

        let summary = summarize_bradford(&members, &attendance, 12, make_date("2024-03-01"));

        assert_eq!(summary.high_risk, 1);
        assert_eq!(summary.concerns, 1);
        assert_eq!(summary.flagged.len(), 2);
        assert_eq!(summary.flagged[0].member_id, "tm-1");
        assert_eq!(summary.flagged[0].score.score, 125);
        assert_eq!(summary.flagged[1].member_id, "tm-2");
        assert_eq!(summary.flagged[1].score.level, BradfordLevel::Medium);
    }

    #[test]
    fn test_empty_roster() {
        let overview = build_team_overview(&[], &[], make_date("2024-01-10"), 12);
        assert_eq!(overview.total_members, 0);
        assert_eq!(overview.absent, 0);
        assert!(overview.clients.is_empty());
        assert!(overview.bradford.flagged.is_empty());
    }
}
