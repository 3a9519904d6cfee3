// ============================================================================
// Office Core - Invite Code Entity
// File: crates/office-core/src/domain/invite_code.rs
// Description: Single-use, time-bounded token granting office membership
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use office_shared::constants::{
    INVITE_CODE_ALPHABET, INVITE_CODE_LENGTH, MAX_INVITE_TTL_DAYS,
};

use super::member::OfficeRole;
use crate::error::DomainError;

/// Invite code entity.
///
/// Lifecycle: Issued -> Redeemed, or Issued -> Expired. Expiry is not a
/// stored transition but the derived predicate `now > expires_at`; both
/// outcomes are terminal with respect to redemption.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteCode {
    pub id: Uuid,
    #[validate(length(equal = 8))]
    pub code: String,
    pub office_id: Uuid,
    pub role: OfficeRole,
    pub created_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub used_by: Option<Uuid>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl InviteCode {
    /// Build a fresh invite with a newly generated code.
    pub fn new(
        office_id: Uuid,
        role: OfficeRole,
        created_by: Uuid,
        ttl_days: i64,
    ) -> Result<Self, DomainError> {
        if !(1..=MAX_INVITE_TTL_DAYS).contains(&ttl_days) {
            return Err(DomainError::ValidationError(format!(
                "ttl_days must be between 1 and {}",
                MAX_INVITE_TTL_DAYS
            )));
        }

        let now = Utc::now();
        let invite = Self {
            id: office_shared::types::new_id(),
            code: Self::generate_code(),
            office_id,
            role,
            created_by,
            expires_at: now + Duration::days(ttl_days),
            used: false,
            used_by: None,
            used_at: None,
            created_at: now,
        };
        invite.validate()?;
        Ok(invite)
    }

    /// Generate a random code from the invite alphabet.
    pub fn generate_code() -> String {
        let mut rng = rand::rng();
        (0..INVITE_CODE_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..INVITE_CODE_ALPHABET.len());
                INVITE_CODE_ALPHABET[idx] as char
            })
            .collect()
    }

    /// Normalize user input before lookup: codes are stored uppercase.
    pub fn normalize(input: &str) -> String {
        input.trim().to_ascii_uppercase()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// `used`, `used_by` and `used_at` are always set together.
    pub fn mark_used(&mut self, user_id: Uuid, used_at: DateTime<Utc>) {
        self.used = true;
        self.used_by = Some(user_id);
        self.used_at = Some(used_at);
    }
}

/// Result of a successful redemption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub office_id: Uuid,
    pub role: OfficeRole,
    pub joined_at: DateTime<Utc>,
}
