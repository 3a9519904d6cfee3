// ============================================================================
// Office Core - Audit Service
// File: crates/office-core/src/services/audit_service.rs
// ============================================================================
//! Append-only audit trail sink.
//!
//! The service is a passive sink: it never rejects an entry based on its
//! content. A failed write surfaces as `AuditWriteFailure`, which callers
//! must treat as non-fatal to the mutation that triggered the entry.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use office_shared::types::Pagination;

use crate::domain::AuditLogEntry;
use crate::error::DomainError;
use crate::repositories::AuditRepository;

pub struct AuditService<A: AuditRepository> {
    repo: Arc<A>,
}

impl<A: AuditRepository> AuditService<A> {
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    /// Append one entry to the audit trail.
    pub async fn record(&self, entry: AuditLogEntry) -> Result<(), DomainError> {
        self.repo.append(&entry).await.map_err(|e| {
            error!(
                action = %entry.action,
                office_id = %entry.office_id,
                actor_id = %entry.actor_id,
                "Audit write failed: {}", e
            );
            DomainError::AuditWriteFailure(e.to_string())
        })
    }

    /// Audit entries for one office, newest first.
    pub async fn entries_for_office(
        &self,
        office_id: Uuid,
        pagination: Pagination,
    ) -> Result<Vec<AuditLogEntry>, DomainError> {
        self.repo.list_by_office(office_id, pagination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockAuditRepository;

    fn entry() -> AuditLogEntry {
        AuditLogEntry::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "UPDATE_PROFILE",
            "member_profile",
            Uuid::new_v4(),
            None,
            Some(serde_json::json!({"phone": "123"})),
        )
    }

    #[tokio::test]
    async fn record_maps_store_failure_to_audit_write_failure() {
        let mut repo = MockAuditRepository::new();
        repo.expect_append()
            .returning(|_| Err(DomainError::DatabaseError("connection reset".into())));

        let service = AuditService::new(Arc::new(repo));
        let result = service.record(entry()).await;
        assert!(matches!(result, Err(DomainError::AuditWriteFailure(_))));
    }

    #[tokio::test]
    async fn record_accepts_any_well_formed_entry() {
        let mut repo = MockAuditRepository::new();
        repo.expect_append().times(1).returning(|_| Ok(()));

        let service = AuditService::new(Arc::new(repo));
        assert!(service.record(entry()).await.is_ok());
    }
}
