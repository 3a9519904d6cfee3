// ============================================================================
// Office Core - Member Entity
// File: crates/office-core/src/domain/member.rs
// Description: User-Office relationship with a role
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Office role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfficeRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl OfficeRole {
    pub const ALL: [OfficeRole; 4] = [
        OfficeRole::Owner,
        OfficeRole::Admin,
        OfficeRole::Member,
        OfficeRole::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfficeRole::Owner => "owner",
            OfficeRole::Admin => "admin",
            OfficeRole::Member => "member",
            OfficeRole::Viewer => "viewer",
        }
    }

    /// Parse a stored role name. Unknown names map to `None`, never to a role.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(OfficeRole::Owner),
            "admin" => Some(OfficeRole::Admin),
            "member" => Some(OfficeRole::Member),
            "viewer" => Some(OfficeRole::Viewer),
            _ => None,
        }
    }
}

/// Member entity: binds a user identity to an office at a role.
///
/// At most one active member row may exist per (office_id, user_id) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub office_id: Uuid,
    pub user_id: Uuid,
    pub role: OfficeRole,
    pub joined_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl Member {
    pub fn new(office_id: Uuid, user_id: Uuid, role: OfficeRole) -> Self {
        Self {
            id: office_shared::types::new_id(),
            office_id,
            user_id,
            role,
            joined_at: Utc::now(),
            removed_at: None,
            removed_by: None,
        }
    }

    pub fn soft_remove(&mut self, removed_by: Uuid) {
        self.removed_at = Some(Utc::now());
        self.removed_by = Some(removed_by);
    }

    pub fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in OfficeRole::ALL {
            assert_eq!(OfficeRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_unknown_role_parses_to_none() {
        assert_eq!(OfficeRole::parse("superuser"), None);
        assert_eq!(OfficeRole::parse(""), None);
        assert_eq!(OfficeRole::parse("Owner"), None);
    }

    #[test]
    fn test_soft_remove() {
        let mut member = Member::new(Uuid::new_v4(), Uuid::new_v4(), OfficeRole::Member);
        assert!(member.is_active());

        let remover = Uuid::new_v4();
        member.soft_remove(remover);
        assert!(!member.is_active());
        assert_eq!(member.removed_by, Some(remover));
    }
}
