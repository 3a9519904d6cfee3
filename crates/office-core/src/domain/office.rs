// ============================================================================
// Office Core - Office Entity
// File: crates/office-core/src/domain/office.rs
// Description: Tenant boundary; every row in the system is scoped to one office
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// Office entity (tenant boundary)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Office {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Office {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let office = Self {
            id: office_shared::types::new_id(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        };
        office.validate()?;
        Ok(office)
    }
}
