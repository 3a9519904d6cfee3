// ============================================================================
// Office Core - Office Service
// File: crates/office-core/src/services/office_service.rs
// ============================================================================
//! Tenant bootstrap: a new office and its owner membership.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Member, Office, OfficeRole};
use crate::error::DomainError;
use crate::repositories::{MemberRepository, OfficeRepository};

pub struct OfficeService<O: OfficeRepository, M: MemberRepository> {
    offices: Arc<O>,
    members: Arc<M>,
}

impl<O: OfficeRepository, M: MemberRepository> OfficeService<O, M> {
    pub fn new(offices: Arc<O>, members: Arc<M>) -> Self {
        Self { offices, members }
    }

    /// Create an office and enroll its first member as owner.
    pub async fn bootstrap(
        &self,
        name: &str,
        owner_user_id: Uuid,
    ) -> Result<(Office, Member), DomainError> {
        let office = Office::new(name)?;
        self.offices.insert(&office).await?;

        let owner = Member::new(office.id, owner_user_id, OfficeRole::Owner);
        self.members.insert(&owner).await?;

        info!(office_id = %office.id, %owner_user_id, "Office bootstrapped");
        Ok((office, owner))
    }

    pub async fn find(&self, id: Uuid) -> Result<Office, DomainError> {
        self.offices
            .find_by_id(id)
            .await?
            .ok_or(DomainError::OfficeNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockMemberRepository, MockOfficeRepository};

    #[tokio::test]
    async fn bootstrap_creates_office_and_owner() {
        let mut offices = MockOfficeRepository::new();
        offices.expect_insert().times(1).returning(|_| Ok(()));

        let mut members = MockMemberRepository::new();
        members
            .expect_insert()
            .times(1)
            .withf(|member| member.role == OfficeRole::Owner)
            .returning(|_| Ok(()));

        let svc = OfficeService::new(Arc::new(offices), Arc::new(members));
        let owner_id = Uuid::new_v4();
        let (office, owner) = svc.bootstrap("Fonseca Advocacia", owner_id).await.unwrap();

        assert_eq!(owner.office_id, office.id);
        assert_eq!(owner.user_id, owner_id);
    }

    #[tokio::test]
    async fn bootstrap_rejects_invalid_name_without_writes() {
        // No expectations: any repository call would panic the mocks.
        let svc = OfficeService::new(
            Arc::new(MockOfficeRepository::new()),
            Arc::new(MockMemberRepository::new()),
        );
        let result = svc.bootstrap("", Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }
}
