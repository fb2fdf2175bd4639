//! Access rules based on the position hierarchy.
//!
//! These checks decide which clients and team members a user may see and
//! whom they may manage. They sit outside the calculation core: callers
//! narrow the roster here, then hand the snapshot to [`crate::calculation`].

use crate::error::{EngineError, EngineResult};
use crate::models::{Client, Position, TeamMember, User};

/// Returns true if `actor` ranks at least as high as `target`.
///
/// # Examples
///
/// ```
/// use attendance_engine::access::can_manage;
/// use attendance_engine::models::Position;
///
/// assert!(can_manage(Position::TeamLead, Position::MedicalBiller));
/// assert!(can_manage(Position::TeamLead, Position::TeamLead));
/// assert!(!can_manage(Position::TeamLead, Position::OperationsManager));
/// ```
pub fn can_manage(actor: Position, target: Position) -> bool {
    actor.rank() >= target.rank()
}

/// Like [`can_manage`], but returns a `PermissionDenied` error on refusal.
pub fn ensure_can_manage(actor: Position, target: Position) -> EngineResult<()> {
    if can_manage(actor, target) {
        Ok(())
    } else {
        Err(EngineError::PermissionDenied {
            actor: actor.to_string(),
            action: format!("manage a {}", target),
        })
    }
}

/// Returns the clients visible to `user`.
///
/// Super Admins see every client; everyone else sees only the clients
/// assigned to them.
pub fn visible_clients<'a>(user: &User, clients: &'a [Client]) -> Vec<&'a Client> {
    clients
        .iter()
        .filter(|c| user.is_super_admin() || user.assigned_clients.contains(&c.id))
        .collect()
}

/// Returns the active team members visible to `user`, sorted by name.
///
/// # Arguments
///
/// * `user` - The viewer
/// * `clients` - All clients
/// * `members` - All team members
/// * `client_filter` - Narrow to a single client id, or `None` for all
///   visible clients
pub fn visible_members<'a>(
    user: &User,
    clients: &[Client],
    members: &'a [TeamMember],
    client_filter: Option<&str>,
) -> Vec<&'a TeamMember> {
    let client_ids: Vec<&str> = visible_clients(user, clients)
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();

    let mut visible: Vec<&TeamMember> = members
        .iter()
        .filter(|m| m.active)
        .filter(|m| user.is_super_admin() || client_ids.contains(&m.client_id.as_str()))
        .filter(|m| client_filter.is_none_or(|id| m.client_id == id))
        .collect();

    visible.sort_by(|a, b| a.name.cmp(&b.name));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(position: Position, assigned: &[&str]) -> User {
        User {
            id: "user-1".to_string(),
            username: "tester".to_string(),
            name: "Tester".to_string(),
            position,
            assigned_clients: assigned.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    fn client(id: &str) -> Client {
        Client {
            id: id.to_string(),
            name: id.to_uppercase(),
            code: id.to_string(),
            active: true,
        }
    }

    fn member(id: &str, name: &str, client_id: &str, active: bool) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: name.to_string(),
            position: Position::MedicalCoder,
            client_id: client_id.to_string(),
            shift: "09:00-17:00".to_string(),
            team_lead_id: None,
            active,
        }
    }

    #[test]
    fn test_equal_rank_can_manage() {
        assert!(can_manage(Position::MedicalBiller, Position::MedicalCoder));
        assert!(can_manage(Position::MedicalCoder, Position::MedicalBiller));
    }

    #[test]
    fn test_ensure_can_manage_reports_positions() {
        let err = ensure_can_manage(Position::AssistantTeamLead, Position::SeniorTeamLead)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Permission denied: Assistant Team Lead cannot manage a Senior Team Lead"
        );
        assert!(ensure_can_manage(Position::SuperAdmin, Position::SuperAdmin).is_ok());
    }

    #[test]
    fn test_super_admin_sees_all_clients() {
        let clients = vec![client("client-1"), client("client-2")];
        let admin = user(Position::SuperAdmin, &[]);
        assert_eq!(visible_clients(&admin, &clients).len(), 2);
    }

    #[test]
    fn test_lead_sees_assigned_clients_only() {
        let clients = vec![client("client-1"), client("client-2")];
        let lead = user(Position::TeamLead, &["client-2"]);
        let visible = visible_clients(&lead, &clients);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "client-2");
    }

    #[test]
    fn test_visible_members_filters_and_sorts() {
        let clients = vec![client("client-1"), client("client-2")];
        let members = vec![
            member("tm-1", "Zoe", "client-1", true),
            member("tm-2", "Amy", "client-1", true),
            member("tm-3", "Bob", "client-1", false),
            member("tm-4", "Cat", "client-2", true),
        ];
        let lead = user(Position::TeamLead, &["client-1"]);

        let visible = visible_members(&lead, &clients, &members, None);
        let names: Vec<&str> = visible.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Zoe"]);
    }

    #[test]
    fn test_visible_members_with_client_filter() {
        let clients = vec![client("client-1"), client("client-2")];
        let members = vec![
            member("tm-1", "Zoe", "client-1", true),
            member("tm-4", "Cat", "client-2", true),
        ];
        let admin = user(Position::SuperAdmin, &[]);

        let visible = visible_members(&admin, &clients, &members, Some("client-2"));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "tm-4");
    }

    #[test]
    fn test_filter_on_unassigned_client_returns_nothing() {
        let clients = vec![client("client-1"), client("client-2")];
        let members = vec![member("tm-4", "Cat", "client-2", true)];
        let lead = user(Position::TeamLead, &["client-1"]);

        assert!(visible_members(&lead, &clients, &members, Some("client-2")).is_empty());
    }
}
