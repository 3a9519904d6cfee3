//! Repository traits (ports)

pub mod audit_repository;
pub mod invite_repository;
pub mod member_repository;
pub mod office_repository;

pub use audit_repository::AuditRepository;
pub use invite_repository::InviteRepository;
pub use member_repository::MemberRepository;
pub use office_repository::OfficeRepository;

#[cfg(test)]
pub use audit_repository::MockAuditRepository;
#[cfg(test)]
pub use invite_repository::MockInviteRepository;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
#[cfg(test)]
pub use office_repository::MockOfficeRepository;
