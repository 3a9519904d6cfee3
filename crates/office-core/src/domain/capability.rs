// ============================================================================
// Office Core - Role Capability Matrix
// File: crates/office-core/src/domain/capability.rs
// Description: Pure, stateless mapping from office roles to capabilities
// ============================================================================

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::member::OfficeRole;

/// A single permitted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewClients,
    EditClients,
    DeleteClients,
    ViewProcesses,
    EditProcesses,
    DeleteProcesses,
    ViewFinancial,
    EditFinancial,
    DeleteFinancial,
    ViewDocuments,
    EditDocuments,
    DeleteDocuments,
    ManageUsers,
    ManageOffice,
}

impl Capability {
    pub const ALL: [Capability; 14] = [
        Capability::ViewClients,
        Capability::EditClients,
        Capability::DeleteClients,
        Capability::ViewProcesses,
        Capability::EditProcesses,
        Capability::DeleteProcesses,
        Capability::ViewFinancial,
        Capability::EditFinancial,
        Capability::DeleteFinancial,
        Capability::ViewDocuments,
        Capability::EditDocuments,
        Capability::DeleteDocuments,
        Capability::ManageUsers,
        Capability::ManageOffice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewClients => "view_clients",
            Capability::EditClients => "edit_clients",
            Capability::DeleteClients => "delete_clients",
            Capability::ViewProcesses => "view_processes",
            Capability::EditProcesses => "edit_processes",
            Capability::DeleteProcesses => "delete_processes",
            Capability::ViewFinancial => "view_financial",
            Capability::EditFinancial => "edit_financial",
            Capability::DeleteFinancial => "delete_financial",
            Capability::ViewDocuments => "view_documents",
            Capability::EditDocuments => "edit_documents",
            Capability::DeleteDocuments => "delete_documents",
            Capability::ManageUsers => "manage_users",
            Capability::ManageOffice => "manage_office",
        }
    }

    fn is_view(&self) -> bool {
        matches!(
            self,
            Capability::ViewClients
                | Capability::ViewProcesses
                | Capability::ViewFinancial
                | Capability::ViewDocuments
        )
    }

    fn is_edit(&self) -> bool {
        matches!(
            self,
            Capability::EditClients
                | Capability::EditProcesses
                | Capability::EditFinancial
                | Capability::EditDocuments
        )
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of capabilities granted to a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    caps: HashSet<Capability>,
}

impl CapabilitySet {
    /// The empty set: every capability denied.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.caps.contains(&capability)
    }

    pub fn len(&self) -> usize {
        self.caps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.caps.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            caps: iter.into_iter().collect(),
        }
    }
}

/// Pure role-to-capability mapping.
///
/// Total over the closed role and capability enumerations. The string entry
/// points fail closed: an unknown role name is denied every capability.
pub struct RoleCapabilityMatrix;

impl RoleCapabilityMatrix {
    pub fn is_allowed(role: OfficeRole, capability: Capability) -> bool {
        match role {
            OfficeRole::Owner => true,
            OfficeRole::Admin => capability != Capability::ManageOffice,
            OfficeRole::Member => capability.is_view() || capability.is_edit(),
            OfficeRole::Viewer => capability.is_view(),
        }
    }

    pub fn capabilities_for(role: OfficeRole) -> CapabilitySet {
        Capability::ALL
            .iter()
            .copied()
            .filter(|cap| Self::is_allowed(role, *cap))
            .collect()
    }

    pub fn is_allowed_for_name(role_name: &str, capability: Capability) -> bool {
        OfficeRole::parse(role_name)
            .map(|role| Self::is_allowed(role, capability))
            .unwrap_or(false)
    }

    pub fn capabilities_for_name(role_name: &str) -> CapabilitySet {
        OfficeRole::parse(role_name)
            .map(Self::capabilities_for)
            .unwrap_or_else(CapabilitySet::none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_is_total_and_consistent() {
        // Every (role, capability) pair has a defined answer, and the set
        // view agrees with the predicate view for all of them.
        for role in OfficeRole::ALL {
            let set = RoleCapabilityMatrix::capabilities_for(role);
            for cap in Capability::ALL {
                assert_eq!(
                    RoleCapabilityMatrix::is_allowed(role, cap),
                    set.contains(cap),
                    "mismatch for {} / {}",
                    role.as_str(),
                    cap
                );
            }
        }
    }

    #[test]
    fn test_owner_has_every_capability() {
        let set = RoleCapabilityMatrix::capabilities_for(OfficeRole::Owner);
        assert_eq!(set.len(), Capability::ALL.len());
    }

    #[test]
    fn test_admin_cannot_manage_office() {
        assert!(!RoleCapabilityMatrix::is_allowed(
            OfficeRole::Admin,
            Capability::ManageOffice
        ));
        assert!(RoleCapabilityMatrix::is_allowed(
            OfficeRole::Admin,
            Capability::ManageUsers
        ));
        assert!(RoleCapabilityMatrix::is_allowed(
            OfficeRole::Admin,
            Capability::DeleteClients
        ));
    }

    #[test]
    fn test_member_can_edit_but_not_delete_or_manage() {
        assert!(RoleCapabilityMatrix::is_allowed(
            OfficeRole::Member,
            Capability::EditProcesses
        ));
        assert!(!RoleCapabilityMatrix::is_allowed(
            OfficeRole::Member,
            Capability::DeleteProcesses
        ));
        assert!(!RoleCapabilityMatrix::is_allowed(
            OfficeRole::Member,
            Capability::ManageUsers
        ));
    }

    #[test]
    fn test_viewer_is_read_only() {
        let set = RoleCapabilityMatrix::capabilities_for(OfficeRole::Viewer);
        assert_eq!(set.len(), 4);
        assert!(set.contains(Capability::ViewClients));
        assert!(set.contains(Capability::ViewFinancial));
        assert!(!set.contains(Capability::EditClients));
    }

    #[test]
    fn test_unknown_role_name_is_denied_everything() {
        for cap in Capability::ALL {
            assert!(!RoleCapabilityMatrix::is_allowed_for_name("superuser", cap));
            assert!(!RoleCapabilityMatrix::is_allowed_for_name("", cap));
        }
        assert!(RoleCapabilityMatrix::capabilities_for_name("root").is_empty());
    }

    #[test]
    fn test_known_role_name_delegates_to_matrix() {
        assert!(RoleCapabilityMatrix::is_allowed_for_name(
            "admin",
            Capability::ManageUsers
        ));
        assert!(!RoleCapabilityMatrix::is_allowed_for_name(
            "viewer",
            Capability::EditClients
        ));
    }
}
