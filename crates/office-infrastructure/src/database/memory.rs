// ============================================================================
// Office Infrastructure - In-Memory Store
// File: crates/office-infrastructure/src/database/memory.rs
// Description: Implements every repository port over in-process tables.
//              Used by integration tests and local development.
// ============================================================================

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use office_core::domain::{AuditLogEntry, InviteCode, Member, Office, OfficeRole};
use office_core::error::DomainError;
use office_core::repositories::{
    AuditRepository, InviteRepository, MemberRepository, OfficeRepository,
};
use office_shared::types::Pagination;

/// One shared store implementing all four ports, so a single `Arc` can be
/// handed to every service. `redeem` mirrors the Postgres transaction: the
/// mark-used check and the member insert happen inside one critical section.
#[derive(Default)]
pub struct InMemoryStore {
    offices: Mutex<Vec<Office>>,
    members: Mutex<Vec<Member>>,
    invites: Mutex<Vec<InviteCode>>,
    audit: Mutex<Vec<AuditLogEntry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|_| DomainError::InternalError("in-memory store lock poisoned".into()))
}

fn is_active_member(member: &Member, office_id: Uuid, user_id: Uuid) -> bool {
    member.office_id == office_id && member.user_id == user_id && member.is_active()
}

#[async_trait]
impl OfficeRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Office>, DomainError> {
        Ok(lock(&self.offices)?.iter().find(|o| o.id == id).cloned())
    }

    async fn insert(&self, office: &Office) -> Result<(), DomainError> {
        lock(&self.offices)?.push(office.clone());
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn find_active(
        &self,
        office_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Member>, DomainError> {
        Ok(lock(&self.members)?
            .iter()
            .find(|m| is_active_member(m, office_id, user_id))
            .cloned())
    }

    async fn insert(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = lock(&self.members)?;
        if members
            .iter()
            .any(|m| is_active_member(m, member.office_id, member.user_id))
        {
            return Err(DomainError::AlreadyMember);
        }
        members.push(member.clone());
        Ok(())
    }

    async fn list_by_office(&self, office_id: Uuid) -> Result<Vec<Member>, DomainError> {
        let mut result: Vec<Member> = lock(&self.members)?
            .iter()
            .filter(|m| m.office_id == office_id && m.is_active())
            .cloned()
            .collect();
        result.sort_by_key(|m| m.joined_at);
        Ok(result)
    }

    async fn update_role(
        &self,
        office_id: Uuid,
        user_id: Uuid,
        role: OfficeRole,
    ) -> Result<Member, DomainError> {
        let mut members = lock(&self.members)?;
        let member = members
            .iter_mut()
            .find(|m| is_active_member(m, office_id, user_id))
            .ok_or(DomainError::MemberNotFound)?;
        member.role = role;
        Ok(member.clone())
    }

    async fn remove(
        &self,
        office_id: Uuid,
        user_id: Uuid,
        removed_by: Uuid,
        removed_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut members = lock(&self.members)?;
        let member = members
            .iter_mut()
            .find(|m| is_active_member(m, office_id, user_id))
            .ok_or(DomainError::MemberNotFound)?;
        member.removed_at = Some(removed_at);
        member.removed_by = Some(removed_by);
        Ok(())
    }
}

#[async_trait]
impl InviteRepository for InMemoryStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DomainError> {
        Ok(lock(&self.invites)?.iter().find(|i| i.code == code).cloned())
    }

    async fn insert(&self, invite: &InviteCode) -> Result<(), DomainError> {
        let mut invites = lock(&self.invites)?;
        // Mirrors the unique index on code.
        if invites.iter().any(|i| i.code == invite.code) {
            return Err(DomainError::DatabaseError("duplicate invite code".into()));
        }
        invites.push(invite.clone());
        Ok(())
    }

    async fn redeem(
        &self,
        invite_id: Uuid,
        member: &Member,
        used_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut invites = lock(&self.invites)?;
        let mut members = lock(&self.members)?;

        let invite = invites
            .iter_mut()
            .find(|i| i.id == invite_id)
            .ok_or(DomainError::InvalidCode)?;
        if invite.used {
            return Err(DomainError::AlreadyUsedCode);
        }
        if members
            .iter()
            .any(|m| is_active_member(m, member.office_id, member.user_id))
        {
            return Err(DomainError::AlreadyMember);
        }

        invite.mark_used(member.user_id, used_at);
        members.push(member.clone());
        Ok(())
    }

    async fn list_by_office(&self, office_id: Uuid) -> Result<Vec<InviteCode>, DomainError> {
        let mut result: Vec<InviteCode> = lock(&self.invites)?
            .iter()
            .filter(|i| i.office_id == office_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}

#[async_trait]
impl AuditRepository for InMemoryStore {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), DomainError> {
        lock(&self.audit)?.push(entry.clone());
        Ok(())
    }

    async fn list_by_office(
        &self,
        office_id: Uuid,
        pagination: Pagination,
    ) -> Result<Vec<AuditLogEntry>, DomainError> {
        let mut result: Vec<AuditLogEntry> = lock(&self.audit)?
            .iter()
            .filter(|e| e.office_id == office_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect())
    }
}
