//! # Office Core - Domain Module
//!
//! Domain entities for the office access-control and audit subsystem.

pub mod audit;
pub mod capability;
pub mod invite_code;
pub mod member;
pub mod office;

// Re-export all entities and enums
pub use audit::{
    AuditLogEntry, ACTION_REDEEM_INVITE, ACTION_REMOVE_MEMBER, ACTION_UPDATE_MEMBER_ROLE,
};
pub use capability::{Capability, CapabilitySet, RoleCapabilityMatrix};
pub use invite_code::{InviteCode, Membership};
pub use member::{Member, OfficeRole};
pub use office::Office;
