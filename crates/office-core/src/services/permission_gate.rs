// ============================================================================
// Office Core - Permission Gate
// File: crates/office-core/src/services/permission_gate.rs
// ============================================================================
//! Facade the surrounding application calls: authorization decisions plus
//! audited mutations.

use std::future::Future;
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::{AuditLogEntry, Capability, OfficeRole, RoleCapabilityMatrix};
use crate::error::DomainError;
use crate::repositories::AuditRepository;
use crate::services::AuditService;

/// Outcome of an audited mutation.
///
/// `audit_failure` carries the (non-fatal) audit-write error, if any, so the
/// caller can escalate visibility without failing the mutation itself.
#[derive(Debug)]
pub struct Audited<T> {
    pub value: T,
    pub audit_failure: Option<DomainError>,
}

pub struct PermissionGate<A: AuditRepository> {
    audit: Arc<AuditService<A>>,
}

impl<A: AuditRepository> PermissionGate<A> {
    pub fn new(audit: Arc<AuditService<A>>) -> Self {
        Self { audit }
    }

    /// Allow/deny decision for a role and capability.
    pub fn authorize(&self, role: OfficeRole, capability: Capability) -> bool {
        RoleCapabilityMatrix::is_allowed(role, capability)
    }

    /// Fail-closed decision for a role name that may not be in the closed
    /// enumeration: unknown names are denied every capability.
    pub fn authorize_role_name(&self, role_name: &str, capability: Capability) -> bool {
        RoleCapabilityMatrix::is_allowed_for_name(role_name, capability)
    }

    /// `authorize`, as a result. Denial is a normal outcome, not a fault.
    pub fn require(&self, role: OfficeRole, capability: Capability) -> Result<(), DomainError> {
        if self.authorize(role, capability) {
            Ok(())
        } else {
            warn!(role = role.as_str(), %capability, "Permission denied");
            Err(DomainError::Unauthorized { capability })
        }
    }

    /// Run the caller's mutation, then record an audit entry for it.
    ///
    /// The entry is recorded only when the mutation succeeds; an audit-write
    /// failure never fails the mutation and is returned in `Audited` instead.
    #[allow(clippy::too_many_arguments)]
    pub async fn with_audit<T, E, Fut>(
        &self,
        actor_id: Uuid,
        office_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: Uuid,
        old_data: Option<serde_json::Value>,
        new_data: Option<serde_json::Value>,
        op: Fut,
    ) -> Result<Audited<T>, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let value = op.await?;

        let entry = AuditLogEntry::new(
            actor_id, office_id, action, entity_type, entity_id, old_data, new_data,
        );
        let audit_failure = match self.audit.record(entry).await {
            Ok(()) => None,
            Err(e) => {
                warn!(action, "Audit write failed after mutation: {}", e);
                Some(e)
            }
        };

        Ok(Audited {
            value,
            audit_failure,
        })
    }
}
