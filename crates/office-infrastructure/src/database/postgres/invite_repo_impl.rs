// ============================================================================
// Office Infrastructure - PostgreSQL Invite Repository
// File: crates/office-infrastructure/src/database/postgres/invite_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use office_core::domain::{InviteCode, Member, OfficeRole};
use office_core::error::DomainError;
use office_core::repositories::InviteRepository;

use super::{is_unique_violation, map_sqlx_err};

pub struct PgInviteRepository {
    pool: PgPool,
}

impl PgInviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct InviteRow {
    pub id: Uuid,
    pub code: String,
    pub office_id: Uuid,
    pub role: String,
    pub created_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub used_by: Option<Uuid>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<InviteRow> for InviteCode {
    fn from(row: InviteRow) -> Self {
        InviteCode {
            id: row.id,
            code: row.code,
            office_id: row.office_id,
            // Fail closed on an unknown stored role.
            role: OfficeRole::parse(&row.role).unwrap_or(OfficeRole::Viewer),
            created_by: row.created_by,
            expires_at: row.expires_at,
            used: row.used,
            used_by: row.used_by,
            used_at: row.used_at,
            created_at: row.created_at,
        }
    }
}

const INVITE_COLUMNS: &str =
    "id, code, office_id, role, created_by, expires_at, used, used_by, used_at, created_at";

#[async_trait]
impl InviteRepository for PgInviteRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DomainError> {
        let row: Option<InviteRow> = sqlx::query_as(&format!(
            r#"
            SELECT {INVITE_COLUMNS}
            FROM office_invites
            WHERE code = $1
            "#
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("finding invite by code", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn insert(&self, invite: &InviteCode) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO office_invites
                (id, code, office_id, role, created_by, expires_at, used, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(invite.id)
        .bind(&invite.code)
        .bind(invite.office_id)
        .bind(invite.role.as_str())
        .bind(invite.created_by)
        .bind(invite.expires_at)
        .bind(invite.used)
        .bind(invite.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("creating invite", e))?;

        info!(invite_id = %invite.id, office_id = %invite.office_id, "Invite created");
        Ok(())
    }

    /// Conditional mark-used plus member insert, in one transaction.
    ///
    /// The UPDATE is guarded by `used = FALSE`; zero affected rows means a
    /// concurrent redemption won the race. Dropping the transaction without
    /// commit rolls back, so neither write is ever visible alone.
    async fn redeem(
        &self,
        invite_id: Uuid,
        member: &Member,
        used_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_err("starting redemption transaction", e))?;

        let updated = sqlx::query(
            r#"
            UPDATE office_invites
            SET used = TRUE, used_by = $2, used_at = $3
            WHERE id = $1 AND used = FALSE
            "#,
        )
        .bind(invite_id)
        .bind(member.user_id)
        .bind(used_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_err("marking invite used", e))?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::AlreadyUsedCode);
        }

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
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::AlreadyMember
            } else {
                map_sqlx_err("creating member from invite", e)
            }
        })?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_err("committing redemption", e))?;

        info!(%invite_id, office_id = %member.office_id, user_id = %member.user_id, "Invite redeemed");
        Ok(())
    }

    async fn list_by_office(&self, office_id: Uuid) -> Result<Vec<InviteCode>, DomainError> {
        let rows: Vec<InviteRow> = sqlx::query_as(&format!(
            r#"
            SELECT {INVITE_COLUMNS}
            FROM office_invites
            WHERE office_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(office_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("listing invites", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
