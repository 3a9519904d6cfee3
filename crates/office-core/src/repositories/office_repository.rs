//! Office repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::Office;
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait OfficeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Office>, DomainError>;
    async fn insert(&self, office: &Office) -> Result<(), DomainError>;
}
