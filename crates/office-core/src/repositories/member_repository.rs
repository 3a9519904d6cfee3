//! Member repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{Member, OfficeRole};
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find the active (not removed) member row for a user in an office.
    async fn find_active(
        &self,
        office_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Member>, DomainError>;

    /// Insert a member row. Violating the one-active-row-per-(office, user)
    /// invariant maps to `AlreadyMember`.
    async fn insert(&self, member: &Member) -> Result<(), DomainError>;

    async fn list_by_office(&self, office_id: Uuid) -> Result<Vec<Member>, DomainError>;

    /// Change the role of an active member, returning the updated row.
    async fn update_role(
        &self,
        office_id: Uuid,
        user_id: Uuid,
        role: OfficeRole,
    ) -> Result<Member, DomainError>;

    /// Soft-remove an active member.
    async fn remove(
        &self,
        office_id: Uuid,
        user_id: Uuid,
        removed_by: Uuid,
        removed_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
}
