//! PostgreSQL repository implementations

mod audit_repo_impl;
mod invite_repo_impl;
mod member_repo_impl;
mod office_repo_impl;

pub use audit_repo_impl::PgAuditRepository;
pub use invite_repo_impl::PgInviteRepository;
pub use member_repo_impl::PgMemberRepository;
pub use office_repo_impl::PgOfficeRepository;

use office_core::error::DomainError;
use tracing::error;

/// Map a sqlx error onto the domain taxonomy. Pool/IO faults are transient
/// and retryable (`StoreUnavailable`); everything else is `DatabaseError`.
pub(crate) fn map_sqlx_err(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    match &e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DomainError::StoreUnavailable(e.to_string())
        }
        _ => DomainError::DatabaseError(e.to_string()),
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
