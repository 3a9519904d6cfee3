// ============================================================================
// Office Core - Audit Log Entry
// File: crates/office-core/src/domain/audit.rs
// Description: Immutable record of a state-changing action
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ACTION_REDEEM_INVITE: &str = "REDEEM_INVITE";
pub const ACTION_UPDATE_MEMBER_ROLE: &str = "UPDATE_MEMBER_ROLE";
pub const ACTION_REMOVE_MEMBER: &str = "REMOVE_MEMBER";

/// Audit log entry. Append-only: the core never mutates or deletes one.
///
/// `actor_id` and `office_id` are weak references; the caller is responsible
/// for passing identifiers that exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
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

impl AuditLogEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        actor_id: Uuid,
        office_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: Uuid,
        old_data: Option<serde_json::Value>,
        new_data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: office_shared::types::new_id(),
            actor_id,
            office_id,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            old_data,
            new_data,
            created_at: Utc::now(),
        }
    }
}
