//! Domain errors

use thiserror::Error;

use crate::domain::Capability;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invite code not found")]
    InvalidCode,

    #[error("Invite code has expired")]
    ExpiredCode,

    #[error("Invite code has already been used")]
    AlreadyUsedCode,

    #[error("User is already a member of this office")]
    AlreadyMember,

    #[error("Unable to generate a unique invite code")]
    GenerationExhausted,

    #[error("Not authorized: requires {capability}")]
    Unauthorized { capability: Capability },

    #[error("Member not found")]
    MemberNotFound,

    #[error("Office not found")]
    OfficeNotFound,

    #[error("Audit write failed: {0}")]
    AuditWriteFailure(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
