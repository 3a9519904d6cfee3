//! Audit log repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use office_shared::types::Pagination;

use crate::domain::AuditLogEntry;
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Append one entry. The store is append-only: no update or delete
    /// operation exists on this port.
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), DomainError>;

    /// Entries for one office, newest first.
    async fn list_by_office(
        &self,
        office_id: Uuid,
        pagination: Pagination,
    ) -> Result<Vec<AuditLogEntry>, DomainError>;
}
