//! Domain services

pub mod audit_service;
pub mod invite_service;
pub mod member_service;
pub mod office_service;
pub mod permission_gate;

pub use audit_service::AuditService;
pub use invite_service::InviteService;
pub use member_service::MemberService;
pub use office_service::OfficeService;
pub use permission_gate::{Audited, PermissionGate};
