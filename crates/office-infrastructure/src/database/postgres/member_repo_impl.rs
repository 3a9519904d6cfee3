// ============================================================================
// Office Infrastructure - PostgreSQL Member Repository
// File: crates/office-infrastructure/src/database/postgres/member_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use office_core::domain::{Member, OfficeRole};
use office_core::error::DomainError;
use office_core::repositories::MemberRepository;

use super::{is_unique_violation, map_sqlx_err};

pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MemberRow {
    pub id: Uuid,
    pub office_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: row.id,
            office_id: row.office_id,
            user_id: row.user_id,
            // Fail closed: a row with an unknown role string acts as viewer.
            role: OfficeRole::parse(&row.role).unwrap_or(OfficeRole::Viewer),
            joined_at: row.joined_at,
            removed_at: row.removed_at,
            removed_by: row.removed_by,
        }
    }
}

const MEMBER_COLUMNS: &str = "id, office_id, user_id, role, joined_at, removed_at, removed_by";

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_active(
        &self,
        office_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM office_members
            WHERE office_id = $1 AND user_id = $2 AND removed_at IS NULL
            "#
        ))
        .bind(office_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("finding member", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn insert(&self, member: &Member) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO office_members (id, office_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(member.id)
        .bind(member.office_id)
        .bind(member.user_id)
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::AlreadyMember
            } else {
                map_sqlx_err("creating member", e)
            }
        })?;

        info!(member_id = %member.id, office_id = %member.office_id, "Member created");
        Ok(())
    }

    async fn list_by_office(&self, office_id: Uuid) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM office_members
            WHERE office_id = $1 AND removed_at IS NULL
            ORDER BY joined_at
            "#
        ))
        .bind(office_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("listing members", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update_role(
        &self,
        office_id: Uuid,
        user_id: Uuid,
        role: OfficeRole,
    ) -> Result<Member, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            r#"
            UPDATE office_members
            SET role = $3
            WHERE office_id = $1 AND user_id = $2 AND removed_at IS NULL
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(office_id)
        .bind(user_id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("updating member role", e))?;

        row.map(|r| r.into()).ok_or(DomainError::MemberNotFound)
    }

    async fn remove(
        &self,
        office_id: Uuid,
        user_id: Uuid,
        removed_by: Uuid,
        removed_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE office_members
            SET removed_at = $3, removed_by = $4
            WHERE office_id = $1 AND user_id = $2 AND removed_at IS NULL
            "#,
        )
        .bind(office_id)
        .bind(user_id)
        .bind(removed_at)
        .bind(removed_by)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("removing member", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound);
        }

        info!(%office_id, %user_id, "Member removed");
        Ok(())
    }
}
