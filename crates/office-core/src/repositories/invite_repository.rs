//! Invite code repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{InviteCode, Member};
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Look a code up by its (normalized) string, regardless of state.
    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DomainError>;

    async fn insert(&self, invite: &InviteCode) -> Result<(), DomainError>;

    /// Atomically mark the invite used and create the member row.
    ///
    /// Both writes form one unit: if either fails, neither is visible. The
    /// mark-used step is conditional on `used = false`; if that condition no
    /// longer holds (a concurrent redemption won), the implementation must
    /// return `AlreadyUsedCode`. A membership-uniqueness violation maps to
    /// `AlreadyMember`.
    async fn redeem(
        &self,
        invite_id: Uuid,
        member: &Member,
        used_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    async fn list_by_office(&self, office_id: Uuid) -> Result<Vec<InviteCode>, DomainError>;
}
