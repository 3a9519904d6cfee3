// ============================================================================
// Office Infrastructure - PostgreSQL Office Repository
// File: crates/office-infrastructure/src/database/postgres/office_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use office_core::domain::Office;
use office_core::error::DomainError;
use office_core::repositories::OfficeRepository;

use super::map_sqlx_err;

pub struct PgOfficeRepository {
    pool: PgPool,
}

impl PgOfficeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct OfficeRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<OfficeRow> for Office {
    fn from(row: OfficeRow) -> Self {
        Office {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl OfficeRepository for PgOfficeRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Office>, DomainError> {
        let row: Option<OfficeRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM offices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("finding office by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn insert(&self, office: &Office) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO offices (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(office.id)
        .bind(&office.name)
        .bind(office.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("creating office", e))?;

        Ok(())
    }
}
