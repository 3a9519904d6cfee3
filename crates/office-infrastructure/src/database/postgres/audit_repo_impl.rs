// ============================================================================
// Office Infrastructure - PostgreSQL Audit Repository
// File: crates/office-infrastructure/src/database/postgres/audit_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use office_core::domain::AuditLogEntry;
use office_core::error::DomainError;
use office_core::repositories::AuditRepository;
use office_shared::types::Pagination;

use super::map_sqlx_err;

pub struct PgAuditRepository {
    pool: PgPool,
}

impl PgAuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct AuditRow {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub office_id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditRow> for AuditLogEntry {
    fn from(row: AuditRow) -> Self {
        AuditLogEntry {
            id: row.id,
            actor_id: row.actor_id,
            office_id: row.office_id,
            action: row.action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            old_data: row.old_data,
            new_data: row.new_data,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO audit_log
                (id, actor_id, office_id, action, entity_type, entity_id,
                 old_data, new_data, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id)
        .bind(entry.actor_id)
        .bind(entry.office_id)
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(entry.entity_id)
        .bind(&entry.old_data)
        .bind(&entry.new_data)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("appending audit entry", e))?;

        Ok(())
    }

    async fn list_by_office(
        &self,
        office_id: Uuid,
        pagination: Pagination,
    ) -> Result<Vec<AuditLogEntry>, DomainError> {
        let rows: Vec<AuditRow> = sqlx::query_as(
            r#"
            SELECT id, actor_id, office_id, action, entity_type, entity_id,
                   old_data, new_data, created_at
            FROM audit_log
            WHERE office_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(office_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("listing audit entries", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
