// ============================================================================
// Office Core - Member Service
// File: crates/office-core/src/services/member_service.rs
// ============================================================================
//! Role changes and removals for office members.
//!
//! Every operation takes the acting user's id and role explicitly; the core
//! never reads an ambient auth context.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    AuditLogEntry, Capability, Member, OfficeRole, RoleCapabilityMatrix, ACTION_REMOVE_MEMBER,
    ACTION_UPDATE_MEMBER_ROLE,
};
use crate::error::DomainError;
use crate::repositories::{AuditRepository, MemberRepository};
use crate::services::AuditService;

pub struct MemberService<M: MemberRepository, A: AuditRepository> {
    members: Arc<M>,
    audit: Arc<AuditService<A>>,
}

impl<M: MemberRepository, A: AuditRepository> MemberService<M, A> {
    pub fn new(members: Arc<M>, audit: Arc<AuditService<A>>) -> Self {
        Self { members, audit }
    }

    /// Change an active member's role.
    pub async fn change_role(
        &self,
        actor_id: Uuid,
        actor_role: OfficeRole,
        office_id: Uuid,
        target_user_id: Uuid,
        new_role: OfficeRole,
    ) -> Result<Member, DomainError> {
        if !RoleCapabilityMatrix::is_allowed(actor_role, Capability::ManageUsers) {
            return Err(DomainError::Unauthorized {
                capability: Capability::ManageUsers,
            });
        }

        let current = self
            .members
            .find_active(office_id, target_user_id)
            .await?
            .ok_or(DomainError::MemberNotFound)?;

        let updated = self
            .members
            .update_role(office_id, target_user_id, new_role)
            .await?;

        info!(
            %office_id,
            %target_user_id,
            from = current.role.as_str(),
            to = new_role.as_str(),
            "Member role changed"
        );

        let entry = AuditLogEntry::new(
            actor_id,
            office_id,
            ACTION_UPDATE_MEMBER_ROLE,
            "office_member",
            updated.id,
            Some(json!({ "role": current.role.as_str() })),
            Some(json!({ "role": new_role.as_str() })),
        );
        if let Err(e) = self.audit.record(entry).await {
            warn!("Audit write for role change failed: {}", e);
        }

        Ok(updated)
    }

    /// Remove a member from an office (soft delete).
    ///
    /// The actor id is an explicit parameter: the "am I removing myself"
    /// check compares against it, never against an ambient session lookup.
    pub async fn remove_member(
        &self,
        actor_id: Uuid,
        actor_role: OfficeRole,
        office_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<(), DomainError> {
        if target_user_id == actor_id {
            return Err(DomainError::ValidationError(
                "members cannot remove themselves from an office".into(),
            ));
        }
        if !RoleCapabilityMatrix::is_allowed(actor_role, Capability::ManageUsers) {
            return Err(DomainError::Unauthorized {
                capability: Capability::ManageUsers,
            });
        }

        let current = self
            .members
            .find_active(office_id, target_user_id)
            .await?
            .ok_or(DomainError::MemberNotFound)?;

        let now = Utc::now();
        self.members
            .remove(office_id, target_user_id, actor_id, now)
            .await?;

        info!(%office_id, %target_user_id, "Member removed");

        let entry = AuditLogEntry::new(
            actor_id,
            office_id,
            ACTION_REMOVE_MEMBER,
            "office_member",
            current.id,
            Some(json!({
                "user_id": target_user_id,
                "role": current.role.as_str(),
            })),
            None,
        );
        if let Err(e) = self.audit.record(entry).await {
            warn!("Audit write for member removal failed: {}", e);
        }

        Ok(())
    }

    /// Active members of one office.
    pub async fn members_of(&self, office_id: Uuid) -> Result<Vec<Member>, DomainError> {
        self.members.list_by_office(office_id).await
    }
}
